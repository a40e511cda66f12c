use learnpath::AppConfig;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// In-memory PDF with one text line per page.
pub fn resume_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 11.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => count,
            "Kids" => kids,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

pub fn config_for(compression_url: &str, generation_url: &str, output_path: &str) -> AppConfig {
    let toml_content = format!(
        r#"
[compression]
endpoint = "{}"
api_key = "sd-integration"
timeout_seconds = 10

[generation]
endpoint = "{}"
model = "gemini-2.5-flash-lite"
api_key = "gm-integration"
timeout_seconds = 5
retry_attempts = 1
retry_delay_seconds = 0

[output]
path = "{}"
"#,
        compression_url,
        generation_url,
        output_path.replace('\\', "/")
    );
    AppConfig::from_toml_str(&toml_content).unwrap()
}
