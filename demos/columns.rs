use flow_layout::{Axis, Colour, Document, Font, In, LayoutConfig, Pt, Rect};

fn main() {
    env_logger::init();

    let mut doc = Document::new(LayoutConfig {
        font_size: Pt(10.0),
        ..LayoutConfig::default()
    });
    let font = std::env::args()
        .nth(1)
        .map(|path| std::fs::read(path).expect("can read font file"))
        .map(|bytes| Font::load(bytes).expect("can load font"))
        .map(|font| doc.add_font(font));

    let page = Rect::new(Pt(0.0), Pt(0.0), In(8.5).into(), In(11.0).into());
    let column = |i: usize| {
        let cx = Pt(120.0) + Pt(186.0) * i as f32;
        Rect::centered(cx, Pt(396.0), Pt(168.0), Pt(648.0))
    };

    doc.evaluate(|b| {
        if let Some(font) = font {
            b.font(font).expect("font is in the book");
        }
        b.justify(1.0, Axis::X);
        b.text_box(column(0), |b| {
            b.font_size(Pt(16.0));
            b.text("Lorem Ipsum");
            b.paragraph_break();
            b.font_size(Pt(10.0));
            b.text(lipsum::lipsum(300));
            b.paragraph_break();
            b.fill_colour(Colour::grey(0.4));
            b.text(lipsum::lipsum(600));
        });
        b.text_overflow(column(1));
        b.text_overflow(column(2));
    });

    let mut out = std::fs::File::create("columns.pdf").expect("can create output file");
    doc.write_pdf(page, &mut out).expect("can write pdf");
}
