use crate::builder::Builder;
use crate::canvas::Canvas;
use crate::config::LayoutConfig;
use crate::flow::FlowRegistry;
use crate::font::{Face, Font, FontBook};
use crate::geometry::Rect;
use crate::layout::{DrawContext, Identity, Layout, NoSelection, Pass, SelectionState};
use crate::pdf::PdfCanvas;
use crate::pick::Picker;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::LayoutError;
use id_arena::Id;
use pdf_writer::{Filter, Finish, Name, Pdf};
use std::io::Write;

#[derive(Debug, Default)]
/// A document holds the drawing tree produced by its last evaluation, along
/// with the fonts and flows that tree refers to. Every traversal of the tree
/// ([Document::draw], [Document::draw_selection], [Document::identify])
/// reuses the layout computed the first time, so the passes agree with
/// each other.
pub struct Document {
    pub config: LayoutConfig,
    pub fonts: FontBook,
    root: Layout,
    flows: FlowRegistry,
}

impl Document {
    pub fn new(config: LayoutConfig) -> Document {
        Document {
            config,
            ..Document::default()
        }
    }

    /// Add a font to the document's font book. The returned id selects the
    /// font with [Builder::font].
    pub fn add_font(&mut self, font: Font) -> Id<Face> {
        self.fonts.add_font(font)
    }

    /// Rebuild the drawing tree from scratch. The previous tree and every
    /// flow registered while building it are dropped first.
    pub fn evaluate(&mut self, body: impl FnOnce(&mut Builder<'_>)) {
        self.flows.clear();
        self.root = Layout::default();
        let mut builder = Builder::new(&self.fonts, &mut self.flows, &self.config);
        body(&mut builder);
        self.root = builder.finish();
        log::debug!(
            "document evaluated: {} items, {} flows",
            self.root.len(),
            self.flows.len()
        );
    }

    fn traverse(&mut self, canvas: &mut dyn Canvas, selection: &dyn SelectionState, pass: Pass) {
        let mut ctx = DrawContext::new(canvas, selection, &mut self.flows, &self.config);
        pass.run(&mut self.root, &mut ctx);
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.traverse(canvas, &NoSelection, Pass::Draw);
    }

    /// Frame every drawing `selection` reports as selected
    pub fn draw_selection(&mut self, canvas: &mut dyn Canvas, selection: &dyn SelectionState) {
        self.traverse(canvas, selection, Pass::Selection);
    }

    /// Paint every drawing under its identity, for hit testing
    pub fn identify(&mut self, canvas: &mut dyn Canvas) {
        self.traverse(canvas, &NoSelection, Pass::Identify);
    }

    /// Identity of the topmost drawing at a point, if any
    pub fn pick(&mut self, x: Pt, y: Pt) -> Option<Identity> {
        let mut picker = Picker::new();
        self.identify(&mut picker);
        picker.pick(x, y)
    }

    pub fn root(&self) -> &Layout {
        &self.root
    }

    pub fn flows(&self) -> &FlowRegistry {
        &self.flows
    }

    /// Render the document as a single page PDF covering `media_box`.
    ///
    /// Parsed fonts are embedded whole. Every other face, and the fallback
    /// font, is mapped to the standard Helvetica font.
    pub fn write_pdf<W: Write>(&mut self, media_box: Rect, mut w: W) -> Result<(), LayoutError> {
        let mut canvas = PdfCanvas::new();
        canvas.selection_colour = self.config.selection_colour;
        self.draw(&mut canvas);
        let content = canvas.finish_compressed();

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);
        let page_id = refs.gen(RefType::Page);
        let content_id = refs.gen(RefType::Content);

        let mut writer = Pdf::new();
        writer.catalog(catalog_id).pages(page_tree_id);
        writer.pages(page_tree_id).count(1).kids([page_id]);

        let mut resources = Vec::new();
        for (id, face) in self.fonts.faces.iter() {
            let font_id = match face.metrics.font_file() {
                Some(font) => font.write(&mut refs, id.index(), &mut writer),
                None => fallback_font(&mut refs, &mut writer),
            };
            resources.push((format!("F{}", id.index()), font_id));
        }
        resources.push(("Fallback".to_string(), fallback_font(&mut refs, &mut writer)));

        let mut page = writer.page(page_id);
        page.media_box(media_box.normalized().into());
        page.parent(page_tree_id);
        page.contents(content_id);
        let mut page_resources = page.resources();
        let mut fonts = page_resources.fonts();
        for (name, id) in resources.iter() {
            fonts.pair(Name(name.as_bytes()), *id);
        }
        fonts.finish();
        page_resources.finish();
        page.finish();

        writer
            .stream(content_id, content.as_slice())
            .filter(Filter::FlateDecode);

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

fn fallback_font(refs: &mut ObjectReferences, writer: &mut Pdf) -> pdf_writer::Ref {
    if let Some(id) = refs.get(RefType::Fallback) {
        return id;
    }
    let id = refs.gen(RefType::Fallback);
    writer
        .type1_font(id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    id
}
