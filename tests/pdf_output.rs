use chrono::NaiveDate;
use image::DynamicImage;
use pdf_tabulate::layout::{ColumnSpec, Row};
use pdf_tabulate::{
    AssetError, DirectoryAssets, DocumentRenderer, FontFamily, Image, Labels, LocaleFormatter,
    Logos, MemoryAssets, Pt, Report, ReportError, Signer, TitleBlock,
};

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

fn assets() -> MemoryAssets {
    MemoryAssets::new()
        .with("left.png", Image::new_raster(DynamicImage::new_rgba8(40, 20)))
        .with("right.jpg", Image::new_raster(DynamicImage::new_rgb8(20, 20)))
}

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::single("No.", Pt(40.0), "no"),
        ColumnSpec::composite("Brand / model", Pt(160.0), ["brand", "model"]),
        ColumnSpec::single("Description", Pt(300.0), "description"),
        ColumnSpec::single("Value", Pt(80.0), "value"),
    ]
}

fn rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            Row::new()
                .with("no", (i + 1) as i64)
                .with("brand", "Acme")
                .with("model", format!("R{}", i % 7))
                .with("description", lipsum::lipsum_words(3 + i % 40))
                .with("value", 99.99)
        })
        .collect()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

#[test]
fn reports_render_to_pdf_with_standard_fonts() {
    let fonts = FontFamily::helvetica();
    let formatter = LocaleFormatter::en_us();
    let assets = assets();
    let columns = columns();
    let rows = rows(150);
    let signers = vec![
        Signer::new("Prepared by", "Ana Ruiz", "Clerk"),
        Signer::new("Approved by", "Luis Gil", "Director"),
    ];

    let report = Report::new(
        TitleBlock::new("Inventory").with_heading("Acme Corporation"),
        &columns,
        &rows,
        date(),
        Logos::new("left.png", "right.jpg"),
    )
    .with_signers(&signers)
    .with_metadata_signer(&signers[0])
    .with_total_key("value");

    let renderer = DocumentRenderer::new(&fonts, &formatter, &assets);
    let plan = renderer.plan(&report).expect("can plan");
    let document = renderer.render(&report).expect("can render");
    assert_eq!(document.page_count(), plan.total_pages);
    assert!(plan.total_pages > 1);

    let bytes = document.to_bytes(&fonts);
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(contains(&bytes, b"/Helvetica-Bold"));
    assert!(contains(&bytes, format!("/Count {}", plan.total_pages).as_bytes()));

    let last_footer = format!("(Page {0} of {0})", plan.total_pages);
    assert!(contains(&bytes, last_footer.as_bytes()));
    assert!(contains(&bytes, b"(150 items with total value $14,998.50)"));
    assert!(contains(&bytes, b"(Prepared by: Ana Ruiz)"));
}

#[test]
fn documents_can_be_saved_to_disk() {
    let fonts = FontFamily::helvetica();
    let formatter = LocaleFormatter::es_mx();
    let assets = assets();
    let columns = columns();
    let rows = rows(12);
    let labels = Labels {
        prepared_by: "Elaboró".into(),
        position: "Cargo".into(),
        date: "Fecha".into(),
        page: "Página".into(),
        of: "de".into(),
        items_with_total: "bienes con valor total de".into(),
    };

    let report = Report::new("Inventario", &columns, &rows, date(), Logos::new("left.png", "right.jpg"))
        .with_total_key("value");
    let document = DocumentRenderer::new(&fonts, &formatter, &assets)
        .with_labels(labels)
        .render(&report)
        .expect("can render");

    let path = std::env::temp_dir().join(format!("pdf-tabulate-{}.pdf", std::process::id()));
    document.save(&fonts, &path).expect("can save");
    let written = std::fs::read(&path).expect("can read back");
    std::fs::remove_file(&path).ok();
    assert!(written.starts_with(b"%PDF-"));
    assert!(contains(&written, b"(Inventario)"));
}

#[test]
fn missing_logo_files_are_asset_errors() {
    let fonts = FontFamily::helvetica();
    let formatter = LocaleFormatter::en_us();
    let assets = DirectoryAssets::new(std::env::temp_dir().join("pdf-tabulate-no-such-dir"));
    let columns = columns();
    let rows = rows(3);

    let report = Report::new("Inventory", &columns, &rows, date(), Logos::new("a.png", "b.png"));
    let result = DocumentRenderer::new(&fonts, &formatter, &assets).render(&report);
    assert!(matches!(result, Err(ReportError::Asset(AssetError::Missing(_)))));
}
