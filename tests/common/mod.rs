use flow_layout::{DisplayList, Document, LayoutConfig, Pt, Rect};

/// A document whose fallback font is 10pt: every character advances 5pt,
/// lines are 10pt tall and baselines sit 8pt below the top of a line
pub fn document() -> Document {
    let _ = env_logger::builder().is_test(true).try_init();
    Document::new(LayoutConfig {
        font_size: Pt(10.0),
        ..LayoutConfig::default()
    })
}

/// A box `width` wide and `lines` lines tall whose bottom left corner is at
/// `(x, y)`
pub fn frame(x: f32, y: f32, width: f32, lines: usize) -> Rect {
    Rect::new(Pt(x), Pt(y), Pt(x + width), Pt(y + 10.0 * lines as f32))
}

pub fn render(doc: &mut Document) -> DisplayList {
    let mut canvas = DisplayList::new();
    doc.draw(&mut canvas);
    canvas
}

/// Every word drawn, in drawing order
pub fn drawn_words(canvas: &DisplayList) -> Vec<String> {
    canvas
        .texts()
        .iter()
        .flat_map(|(_, _, text)| text.split_whitespace())
        .map(str::to_string)
        .collect()
}

pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
