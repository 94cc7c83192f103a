use chrono::NaiveDate;
use image::{DynamicImage, Rgb, RgbImage};
use pdf_tabulate::layout::{ColumnSpec, Row};
use pdf_tabulate::{
    DocumentRenderer, Font, FontFamily, Image, LocaleFormatter, Logos, MemoryAssets, Pt, Report,
    Signer, TitleBlock,
};

/// A flat-coloured logo with a darker border
fn logo(width: u32, height: u32, colour: [u8; 3]) -> Image {
    let border = colour.map(|c| c / 2);
    let img = RgbImage::from_fn(width, height, |x, y| {
        if x < 4 || y < 4 || x >= width - 4 || y >= height - 4 {
            Rgb(border)
        } else {
            Rgb(colour)
        }
    });
    Image::new_raster(DynamicImage::ImageRgb8(img))
}

fn main() {
    // usage: inventory [regular.ttf [bold.ttf]]
    let mut args = std::env::args().skip(1);
    let fonts = match args.next() {
        Some(regular) => {
            let regular = Font::load_from_disk(regular).expect("can load regular font");
            let family = FontFamily::new(regular);
            match args.next() {
                Some(bold) => family.with_bold(Font::load_from_disk(bold).expect("can load bold font")),
                None => family,
            }
        }
        None => FontFamily::helvetica(),
    };

    let assets = MemoryAssets::new()
        .with("agency.png", logo(160, 80, [30, 90, 160]))
        .with("state.png", logo(80, 80, [160, 40, 40]));

    let columns = vec![
        ColumnSpec::single("Item", Pt(40.0), "item"),
        ColumnSpec::single("Inventory number", Pt(90.0), "number"),
        ColumnSpec::composite("Brand / model", Pt(140.0), ["brand", "model"]),
        ColumnSpec::single("Description", Pt(260.0), "description"),
        ColumnSpec::single("Serial", Pt(90.0), "serial"),
        ColumnSpec::single("Location", Pt(80.0), "location"),
        ColumnSpec::single("Value", Pt(70.0), "value"),
    ];

    let brands = ["Acme", "Globex", "Initech", "Umbrella"];
    let rows: Vec<Row> = (0..137)
        .map(|i| {
            Row::new()
                .with("item", (i + 1) as i64)
                .with("number", format!("INV-{:05}", 1000 + i * 7))
                .with("brand", brands[i % brands.len()])
                .with("model", format!("M{}", 100 + i % 13))
                .with("description", lipsum::lipsum_words(4 + i % 23))
                .with("serial", if i % 5 == 0 { None } else { Some(format!("SN{:08}", i * 7919)) })
                .with("location", format!("Room {}", 1 + i % 12))
                .with("value", 125.5 + (i * 37 % 400) as f64)
        })
        .collect();

    let signers = vec![
        Signer::new("Prepared by", "Ana Ruiz", "Inventory clerk"),
        Signer::new("Reviewed by", "Luis Gil", "Internal auditor"),
        Signer::new("Approved by", "Marta Sol", "Director of administration"),
    ];

    let report = Report::new(
        TitleBlock::new("Fixed asset inventory").with_heading("Department of Public Works"),
        &columns,
        &rows,
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date"),
        Logos::new("agency.png", "state.png"),
    )
    .with_signers(&signers)
    .with_metadata_signer(&signers[0])
    .with_total_key("value");

    let formatter = LocaleFormatter::en_us();
    let renderer = DocumentRenderer::new(&fonts, &formatter, &assets);
    let plan = renderer.plan(&report).expect("can plan report");
    println!(
        "{} rows over {} pages {:?}",
        rows.len(),
        plan.total_pages,
        plan.per_page_row_counts
    );

    let document = renderer.render(&report).expect("can render report");
    document
        .save(&fonts, "inventory.pdf")
        .expect("can write inventory.pdf");
}
