//! Fixed instruction and worked examples for the structuring prompt
//!
//! These strings are part of the prompt contract: changing any byte changes
//! model behavior, so edits must bump [`EXEMPLAR_SET_VERSION`].

use docsift_domain::Exemplar;

/// Version of the instruction and exemplar set below
pub const EXEMPLAR_SET_VERSION: u32 = 1;

/// Extraction instruction sent ahead of every document
pub const INSTRUCTION: &str = "\
Extract the following details from the invoice: Serial Number, Customer Name, Product Name, \
Quantity, Tax, Total Amount, Date, Customer Phone Number and Total Purchase Amount.
Rules:
- Group the result by customer: each customer name is a top-level key whose value is an object holding that customer's fields.
- A field with one value is a single string or number. A field with several values (one per line item) is an array, and the line-item arrays of one customer have the same length and order.
- Document-wide totals that belong to no single customer (Total Purchase Amount, CGST, SGST, IGST and similar) are top-level string or number entries.
- Use null for a field the document does not contain. Do not invent values.
- Ignore repeated headers, footers, bank details, terms and conditions and other boilerplate.
Return exactly one JSON object with no markdown and no commentary.";

const NOISY_INVOICE_INPUT: &str = "\
TAX INVOICE ORIGINAL FOR RECIPIENT TAX INVOICE ORIGINAL FOR RECIPIENT
Swipe Works GSTIN 29AABCT1332L000 Invoice #: INV-TEST-1526 Invoice Date: 12 Nov 2024
Customer Details: Navya Sri Ph: 8965236147 Place of Supply: 29-KARNATAKA
# Item Rate / Item Qty Taxable Value Tax Amount
1 YONEX ZR 100 LIGHT Racket 25,600.00 7 1,79,200.00 0.00 (0%) 1,79,200.00
2 Matrix and Pillows 45,084.75 1 45,084.75 8,115.25 (18%) 53,200.00
Taxable Amount 3,60,265.75 IGST 18.0% 8,115.25 Total 3,68,381.00
Amount Payable: INR Three Lakh, Sixty-Eight Thousand, Three Hundred And Eighty-One Rupees Only.
Bank Details: Bank: YES BANK Account #: 6678999 IFSC Code: YESBBIN4567
Terms and Conditions: Goods once sold cannot be taken back or exchanged.
Page 1 / 1 This is a digitally signed document. Page 1 / 1 This is a digitally signed document.";

const NOISY_INVOICE_OUTPUT: &str = r#"{
  "Navya Sri": {
    "Serial Number": "INV-TEST-1526",
    "Product Name": ["YONEX ZR 100 LIGHT Racket", "Matrix and Pillows"],
    "Quantity": [7, 1],
    "Tax": ["0.00 (0%)", "8,115.25 (18%)"],
    "Total Amount": ["1,79,200.00", "53,200.00"],
    "Date": "12 Nov 2024",
    "Customer Phone Number": "8965236147"
  },
  "Total Purchase Amount": "3,68,381.00",
  "IGST": "8,115.25"
}"#;

const SALES_REGISTER_INPUT: &str = "\
Invoice No,Date,Amount,Item,Qty,Rate,Tax %,Customer,Company,Phone
RAY/23-24/286,12 Nov 2024,79990,iPHONE 16,1,79990,18,Shounak,NextSpeed Technologies Pvt Ltd,9876500011
RAY/23-24/286,12 Nov 2024,4599,iPHONE 16 Cover,1,4599,18,Shounak,NextSpeed Technologies Pvt Ltd,9876500011
RAY/23-24/285,12 Nov 2024,10000,SPEAKER,1,10000,0,Abhinav,GAME STATION,
RAY/23-24/277,02 Nov 2024,20475,12 MM PLAIN GLASS,15,1365,18,Abhinav,GAME STATION,
,,,,,,,,,
Totals,,115064,,,,,,,
,,,,CGST,4210.11,,,,
,,,,SGST,4210.11,,,,";

const SALES_REGISTER_OUTPUT: &str = r#"{
  "Shounak": {
    "Serial Number": ["RAY/23-24/286", "RAY/23-24/286"],
    "Product Name": ["iPHONE 16", "iPHONE 16 Cover"],
    "Quantity": [1, 1],
    "Tax": ["18%", "18%"],
    "Total Amount": [79990, 4599],
    "Date": "12 Nov 2024",
    "Customer Phone Number": "9876500011",
    "Company Name": "NextSpeed Technologies Pvt Ltd"
  },
  "Abhinav": {
    "Serial Number": ["RAY/23-24/285", "RAY/23-24/277"],
    "Product Name": ["SPEAKER", "12 MM PLAIN GLASS"],
    "Quantity": [1, 15],
    "Tax": ["0%", "18%"],
    "Total Amount": [10000, 20475],
    "Date": ["12 Nov 2024", "02 Nov 2024"],
    "Customer Phone Number": null,
    "Company Name": "GAME STATION"
  },
  "Total Purchase Amount": 115064,
  "CGST": 4210.11,
  "SGST": 4210.11
}"#;

const SCANNED_RECEIPT_INPUT: &str = "\
GREEN LEAF STORES
GSTIN 36AAAAA0000A1Z5
Bill No: GL-0912   Date: 03/01/2025
Customer: Ravi Kumar   Ph: 9000012345
Item              Qty   Rate     Amt
Basmati Rice 5kg   2    450.00   900.00
GST 5%                           45.00
TOTAL                           945.00
Thank you! Visit again
Thank you! Visit again";

const SCANNED_RECEIPT_OUTPUT: &str = r#"{
  "Ravi Kumar": {
    "Serial Number": "GL-0912",
    "Product Name": "Basmati Rice 5kg",
    "Quantity": 2,
    "Tax": "45.00 (5%)",
    "Total Amount": 900.00,
    "Date": "03/01/2025",
    "Customer Phone Number": "9000012345"
  },
  "Total Purchase Amount": 945.00
}"#;

/// The worked examples, in presentation order
///
/// Covers a noisy PDF invoice with one customer, a CSV register with several
/// customers, and an OCR'd receipt where every field is a single value.
pub fn exemplars() -> Vec<Exemplar> {
    vec![
        Exemplar::new(NOISY_INVOICE_INPUT, NOISY_INVOICE_OUTPUT),
        Exemplar::new(SALES_REGISTER_INPUT, SALES_REGISTER_OUTPUT),
        Exemplar::new(SCANNED_RECEIPT_INPUT, SCANNED_RECEIPT_OUTPUT),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate_record;

    #[test]
    fn test_exemplar_outputs_are_valid_records() {
        for (idx, exemplar) in exemplars().iter().enumerate() {
            let value: serde_json::Value = serde_json::from_str(&exemplar.output)
                .unwrap_or_else(|e| panic!("exemplar {} is not JSON: {}", idx, e));
            let record = validate_record(value)
                .unwrap_or_else(|e| panic!("exemplar {} violates the schema: {}", idx, e));
            assert!(record.parties().count() >= 1);
        }
    }

    #[test]
    fn test_exemplars_are_stable() {
        assert_eq!(exemplars(), exemplars());
        assert_eq!(exemplars().len(), 3);
    }

    #[test]
    fn test_instruction_names_every_field() {
        for field in [
            "Serial Number",
            "Customer Name",
            "Product Name",
            "Quantity",
            "Tax",
            "Total Amount",
            "Date",
            "Customer Phone Number",
            "Total Purchase Amount",
        ] {
            assert!(INSTRUCTION.contains(field), "missing {}", field);
        }
    }
}
