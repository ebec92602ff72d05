//! Shared fixture builder for integration tests.
//!
//! Builds real PDFs with lopdf, one text run per `(x, y, size, text)`
//! tuple in PDF coordinates (origin bottom-left), Helvetica throughout;
//! the same shape the statement generators produce.

use lopdf::{Object, Stream, dictionary};

pub type Run = (f64, f64, f64, String);

pub fn run(x: f64, y: f64, size: f64, text: &str) -> Run {
    (x, y, size, text.to_string())
}

pub fn build_pdf(pages: &[Vec<Run>]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ];

    let mut page_ids = Vec::new();
    for runs in pages {
        let mut content = String::new();
        for (x, y, size, text) in runs {
            let escaped = text
                .replace('\\', "\\\\")
                .replace('(', "\\(")
                .replace(')', "\\)");
            content.push_str(&format!("BT /F1 {size} Tf {x} {y} Td ({escaped}) Tj ET\n"));
        }
        let stream = Stream::new(dictionary! {}, content.into_bytes());
        let content_id = doc.add_object(stream);

        let resources = dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        };
        let page_dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => resources,
        };
        page_ids.push(doc.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_ids.len() as i64),
    };
    let pages_id = doc.add_object(pages_dict);

    for &pid in &page_ids {
        if let Ok(page_obj) = doc.get_object_mut(pid) {
            if let Ok(dict) = page_obj.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Scalar section runs for one property page: the property header plus
/// the labeled figures, one visual line each.
pub fn scalar_page(
    property: &str,
    cash_operating: &str,
    ending_cash: &str,
    fee_dollar: &str,
    fee_percent: &str,
    prepaid_line: &str,
) -> Vec<Run> {
    [
        format!("Properties: {property}"),
        "Cash in Bank - Operating".to_string(),
        cash_operating.to_string(),
        "Actual Ending Cash".to_string(),
        ending_cash.to_string(),
        "Management Fees".to_string(),
        fee_dollar.to_string(),
        fee_percent.to_string(),
        prepaid_line.to_string(),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, text)| (72.0, 750.0 - 20.0 * i as f64, 12.0, text))
    .collect()
}

/// Rent-roll page runs: repeated property header, the "Rent Roll" title,
/// a full column header row, one data row per `(tenant, past_due)` pair,
/// and a closing "Grand Total" row.
pub fn rent_roll_page(property: &str, data_rows: &[(&str, &str)]) -> Vec<Run> {
    let mut runs = vec![
        (72.0, 750.0, 12.0, format!("Properties: {property}")),
        run(72.0, 700.0, 12.0, "Rent"),
        run(99.0, 700.0, 12.0, "Roll"),
    ];

    for (x, text) in [
        (72.0, "Unit"),
        (100.0, "Tenant"),
        (140.0, "Additional Tenants"),
        (230.0, "Status"),
        (270.0, "Rent"),
        (300.0, "Deposit"),
        (345.0, "Move-in"),
        (390.0, "Lease From"),
        (445.0, "Lease To"),
        (500.0, "Past Due"),
    ] {
        runs.push(run(x, 660.0, 10.0, text));
    }

    let mut y = 640.0;
    for (i, (tenant, past_due)) in data_rows.iter().enumerate() {
        runs.push((72.0, y, 10.0, format!("10{i}")));
        runs.push(run(110.0, y, 10.0, tenant));
        runs.push(run(230.0, y, 10.0, "Occupied"));
        runs.push(run(500.0, y, 10.0, past_due));
        y -= 20.0;
    }

    runs.push(run(72.0, y, 10.0, "Grand Total"));
    runs
}
