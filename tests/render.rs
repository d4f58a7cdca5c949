//! End-to-end render tests. printpdf writes drawn text into the page
//! content streams as WinAnsi hex strings (`<...> Tj`), so the search
//! helpers look for both the literal needle (PDF syntax such as `%PDF`
//! or `/CreationDate`) and its uppercase hex encoding (drawn text).
//! Non-ASCII glyphs (the pound sign) are re-encoded on the way in and
//! are deliberately not searched for.

use sha2::{Digest, Sha256};

use quotesmith::{render, Quote};

fn quote(v: serde_json::Value) -> Quote {
    serde_json::from_value(v).expect("quote payload")
}

fn sample() -> Quote {
    quote(serde_json::json!({
        "title": "Commercial Waste Collection",
        "bill_to": {
            "name": "Acme Industrial Ltd",
            "address": "Unit 4, Riverside Park, Leeds, LS10 1AB",
            "email": "accounts@acme.example"
        },
        "from": {
            "name": "GreenCycle Services",
            "address": "12 Depot Lane\nSheffield\nS1 2AB"
        },
        "prepared_by": {
            "name": "Jordan Lee",
            "title": "Account Manager",
            "email": "jordan@greencycle.example",
            "phone": "0114 000 0000"
        },
        "reference": {
            "reference": "PO-2024-0917",
            "document_type": "Quote",
            "expiry": "30 September 2024"
        },
        "line_items": [
            { "container": "1100L Bin", "description": "General waste", "movement": "Weekly", "quantity": 2, "price": 38.50 },
            { "container": "240L Bin", "movement": "Fortnightly", "quantity": 1, "price": 12.00 },
            { "container": "Duty of care fee", "synthetic": true, "price": 25.00 }
        ],
        "sections": [
            {
                "title": "Collection Details",
                "rows": [
                    { "label": "Site access", "value": "Rear gate, code 4821" },
                    { "label": "Preferred day", "value": "Tuesday" }
                ]
            }
        ],
        "notes": "Prices exclude VAT. Contamination charges may apply.",
        "footer": "GreenCycle Services | 0114 000 0000 | hello@greencycle.example"
    }))
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    count(haystack, needle) > 0
}

fn count(haystack: &[u8], needle: &str) -> usize {
    let hex: String = needle.bytes().map(|b| format!("{b:02X}")).collect();
    count_bytes(haystack, needle.as_bytes()) + count_bytes(haystack, hex.as_bytes())
}

fn count_bytes(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() || haystack.len() < needle.len() {
        return 0;
    }
    haystack
        .windows(needle.len())
        .filter(|w| *w == needle)
        .count()
}

/// Drop the volatile parts of a serialized PDF: the info-dictionary
/// timestamps and producer, the trailer file identifier and the XMP
/// metadata packet. What remains is a fair fingerprint of the layout.
fn scrub(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut in_xmp = false;
    for line in bytes.split(|b| *b == b'\n') {
        if count(line, "<?xpacket begin") > 0 {
            in_xmp = true;
        }
        let volatile = in_xmp
            || count(line, "/CreationDate") > 0
            || count(line, "/ModDate") > 0
            || count(line, "/Producer") > 0
            || count(line, "/ID") > 0;
        if count(line, "<?xpacket end") > 0 {
            in_xmp = false;
        }
        if !volatile {
            out.extend_from_slice(line);
            out.push(b'\n');
        }
    }
    out
}

fn hash(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}

#[test]
fn identical_input_renders_identical_layout() {
    let q = sample();
    let a = render(&q, None, None).expect("first render");
    let b = render(&q, None, None).expect("second render");
    assert_eq!(a.pages, b.pages);
    assert_eq!(hash(&scrub(&a.bytes)), hash(&scrub(&b.bytes)));
}

#[test]
fn sample_quote_fits_one_page_with_all_blocks() {
    let rendered = render(&sample(), None, None).expect("render");
    assert_eq!(rendered.pages, 1);
    assert!(contains(&rendered.bytes, "%PDF"));
    assert!(contains(&rendered.bytes, "COMMERCIAL WASTE COLLECTION"));
    assert!(contains(&rendered.bytes, "PRODUCTS & SERVICES"));
    assert!(contains(&rendered.bytes, "PO-2024-0917"));
    assert!(contains(&rendered.bytes, "COLLECTION DETAILS"));
    assert!(contains(&rendered.bytes, "One-time subtotal"));
    // 38.50 + 12.00 + 25.00
    assert!(contains(&rendered.bytes, "75.50"));
}

#[test]
fn empty_item_list_skips_the_table_entirely() {
    let mut q = sample();
    q.line_items.clear();
    let rendered = render(&q, None, None).expect("render");
    assert!(!contains(&rendered.bytes, "PRODUCTS & SERVICES"));
    assert!(!contains(&rendered.bytes, "One-time subtotal"));
    // The rest of the document is unaffected.
    assert!(contains(&rendered.bytes, "COLLECTION DETAILS"));
}

#[test]
fn long_tables_repeat_the_header_on_every_page() {
    let items: Vec<serde_json::Value> = (0..60)
        .map(|i| {
            serde_json::json!({
                "container": format!("1100L Bin #{i}"),
                "description": "General waste",
                "movement": "Weekly",
                "quantity": 1,
                "price": 10.0
            })
        })
        .collect();
    let mut q = sample();
    q.line_items = serde_json::from_value(serde_json::Value::Array(items)).expect("items");
    let rendered = render(&q, None, None).expect("render");
    assert!(rendered.pages >= 2);
    let headers = count(&rendered.bytes, "PRODUCTS & SERVICES");
    assert!(headers >= 2);
    assert!(headers <= rendered.pages);
    // Every row was drawn despite the breaks.
    assert!(contains(&rendered.bytes, "1100L Bin #0"));
    assert!(contains(&rendered.bytes, "1100L Bin #59"));
}

#[test]
fn very_long_notes_continue_across_pages_and_terminate() {
    let mut q = sample();
    let baseline = render(&q, None, None).expect("render").pages;
    q.notes = Some(
        "Contamination of recycling streams will incur additional charges. "
            .repeat(120),
    );
    let rendered = render(&q, None, None).expect("render");
    assert!(rendered.pages > baseline);
    assert!(rendered.pages < 12);
    let labels = count(&rendered.bytes, "CAVEATS / COMMENTS");
    assert!(labels >= 2);
}

#[test]
fn section_row_taller_than_a_page_continues_across_pages() {
    let q = quote(serde_json::json!({
        "sections": [{
            "title": "Terms",
            "rows": [{
                "label": "Conditions",
                "value": format!(
                    "OPENING {} CLOSING",
                    "all access routes must be kept clear on collection days. ".repeat(150)
                )
            }]
        }]
    }));
    let rendered = render(&q, None, None).expect("render");
    assert!(rendered.pages >= 2);
    // Every wrapped line was drawn, none lost to the break.
    assert!(contains(&rendered.bytes, "OPENING"));
    assert!(contains(&rendered.bytes, "CLOSING"));
    // The label belongs to the row's first segment only.
    assert_eq!(count(&rendered.bytes, "Conditions"), 1);
}

#[test]
fn multi_line_values_grow_their_rows() {
    let section = |value: &str| {
        let rows: Vec<serde_json::Value> = (0..15)
            .map(|i| serde_json::json!({ "label": format!("Item {i}"), "value": value }))
            .collect();
        quote(serde_json::json!({ "sections": [{ "title": "Checklist", "rows": rows }] }))
    };
    let short = render(&section("yes"), None, None).expect("render");
    let tall = render(
        &section("line one\nline two\nline three\nline four"),
        None,
        None,
    )
    .expect("render");
    assert_eq!(short.pages, 1);
    assert!(tall.pages > short.pages);
    assert!(contains(&tall.bytes, "line four"));
}

#[test]
fn empty_section_values_render_a_placeholder_row() {
    let q = quote(serde_json::json!({
        "sections": [{
            "title": "Site",
            "rows": [{ "label": "Access notes", "value": "" }]
        }]
    }));
    let rendered = render(&q, None, None).expect("render");
    assert_eq!(rendered.pages, 1);
    assert!(contains(&rendered.bytes, "SITE"));
    assert!(contains(&rendered.bytes, "Access notes"));
}

#[test]
fn empty_notes_draw_a_placeholder_box() {
    let mut q = sample();
    q.notes = None;
    let rendered = render(&q, None, None).expect("render");
    assert!(contains(&rendered.bytes, "No additional notes."));
}

#[test]
fn unparsable_prices_render_as_zero_instead_of_failing() {
    let q = quote(serde_json::json!({
        "line_items": [
            { "container": "Skip hire", "price": "call for pricing" }
        ]
    }));
    let rendered = render(&q, None, None).expect("render");
    assert!(contains(&rendered.bytes, "0.00"));
    assert!(contains(&rendered.bytes, "Skip hire"));
}

#[test]
fn sparse_payload_still_renders_a_document() {
    let q = quote(serde_json::json!({}));
    let rendered = render(&q, None, None).expect("render");
    assert_eq!(rendered.pages, 1);
    assert!(contains(&rendered.bytes, "PURCHASE ORDER REVIEW"));
    assert!(contains(&rendered.bytes, "No additional notes."));
}
