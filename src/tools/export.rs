//! Export tools
//!
//! Plain-text sharing and printable PDF output for recipes and shopping lists.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::*;
use serde::Serialize;

use super::require_user;
use crate::db::Database;
use crate::models::{Recipe, ShoppingListItem};

// ============================================================================
// Layout Constants
// ============================================================================

const PAGE_WIDTH: f32 = 215.9; // Letter
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN_LEFT: f32 = 15.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 20.0;
const TEXT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN_LEFT;

const COLOR_TITLE: (u8, u8, u8) = (204, 85, 0); // Burnt orange
const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);
const COLOR_GRAY: (u8, u8, u8) = (128, 128, 128);

// ============================================================================
// Response Types
// ============================================================================

/// Response for share_recipe_text
#[derive(Debug, Serialize)]
pub struct ShareTextResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExportPdfResponse {
    pub success: bool,
    pub file_path: String,
    pub pages: usize,
    pub message: String,
}

// ============================================================================
// Share Text
// ============================================================================

/// Format a recipe as plain text for sharing
pub fn share_text(recipe: &Recipe) -> String {
    let ingredients = recipe
        .ingredients
        .iter()
        .map(|i| format!("- {}", i))
        .collect::<Vec<_>>()
        .join("\n");

    let instructions = recipe
        .instructions
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Recipe: {}\n\n{}\n\nIngredients:\n{}\n\nInstructions:\n{}",
        recipe.recipe_name, recipe.description, ingredients, instructions
    )
}

// ============================================================================
// PDF Generation Helpers
// ============================================================================

fn rgb_to_printpdf(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

fn add_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    x: Mm,
    y: Mm,
    size: f32,
    color: (u8, u8, u8),
) {
    layer.set_fill_color(rgb_to_printpdf(color.0, color.1, color.2));
    layer.use_text(text, size, x, y, font);
}

fn add_line(
    layer: &PdfLayerReference,
    x1: Mm,
    y1: Mm,
    x2: Mm,
    y2: Mm,
    color: (u8, u8, u8),
    width: f32,
) {
    layer.set_outline_color(rgb_to_printpdf(color.0, color.1, color.2));
    layer.set_outline_thickness(width);

    let line = Line {
        points: vec![(Point::new(x1, y1), false), (Point::new(x2, y2), false)],
        is_closed: false,
    };
    layer.add_line(line);
}

/// Greedy word wrap for builtin Helvetica, approximating glyphs as half an em
fn wrap_text(text: &str, size: f32, width_mm: f32) -> Vec<String> {
    let em_mm = size * 0.3528;
    let max_chars = ((width_mm / (em_mm * 0.5)) as usize).max(10);

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Single-column document writer that starts a new page when the current one fills
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    y: f32,
    pages: usize,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self, String> {
        let (doc, page1, layer1) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| e.to_string())?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| e.to_string())?;
        let layer = doc.get_page(page1).get_layer(layer1);

        Ok(Self {
            doc,
            layer,
            font,
            font_bold,
            y: PAGE_HEIGHT - MARGIN_TOP,
            pages: 1,
        })
    }

    fn ensure_space(&mut self, height: f32) {
        if self.y - height >= MARGIN_BOTTOM {
            return;
        }
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN_TOP;
    }

    /// Write wrapped text; continuation lines are indented by `hang` mm
    fn paragraph(&mut self, text: &str, size: f32, bold: bool, color: (u8, u8, u8), hang: f32) {
        let line_height = size * 0.3528 * 1.4;
        for (i, line) in wrap_text(text, size, TEXT_WIDTH - hang).into_iter().enumerate() {
            self.ensure_space(line_height);
            let x = if i == 0 { MARGIN_LEFT } else { MARGIN_LEFT + hang };
            let font = if bold { &self.font_bold } else { &self.font };
            add_text(&self.layer, font, &line, Mm(x), Mm(self.y), size, color);
            self.y -= line_height;
        }
    }

    fn rule(&mut self) {
        self.ensure_space(6.0);
        self.y -= 2.0;
        add_line(
            &self.layer,
            Mm(MARGIN_LEFT),
            Mm(self.y),
            Mm(PAGE_WIDTH - MARGIN_LEFT),
            Mm(self.y),
            COLOR_GRAY,
            0.5,
        );
        self.y -= 6.0;
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    /// Save to `output_path`, creating parent directories. Returns the page count.
    fn save(self, output_path: &str) -> Result<usize, String> {
        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let file = File::create(path).map_err(|e| e.to_string())?;
        let mut writer = BufWriter::new(file);
        self.doc.save(&mut writer).map_err(|e| e.to_string())?;
        Ok(self.pages)
    }
}

// ============================================================================
// Recipe PDF
// ============================================================================

/// Write a printable recipe card
pub fn recipe_pdf(recipe: &Recipe, output_path: &str) -> Result<ExportPdfResponse, String> {
    recipe.validate()?;

    let mut pdf = PdfWriter::new(&recipe.recipe_name)?;

    pdf.paragraph(&recipe.recipe_name, 20.0, true, COLOR_TITLE, 0.0);
    pdf.gap(2.0);
    pdf.paragraph(&recipe.description, 11.0, false, COLOR_GRAY, 0.0);
    pdf.rule();

    pdf.paragraph("Ingredients", 14.0, true, COLOR_BLACK, 0.0);
    pdf.gap(1.0);
    for ingredient in &recipe.ingredients {
        pdf.paragraph(&format!("- {}", ingredient), 11.0, false, COLOR_BLACK, 4.0);
    }
    pdf.gap(4.0);

    pdf.paragraph("Instructions", 14.0, true, COLOR_BLACK, 0.0);
    pdf.gap(1.0);
    for (i, step) in recipe.instructions.iter().enumerate() {
        pdf.paragraph(&format!("{}. {}", i + 1, step), 11.0, false, COLOR_BLACK, 6.0);
        pdf.gap(1.5);
    }

    if let Some(nutrition) = &recipe.nutrition {
        pdf.rule();
        pdf.paragraph("Nutrition (per serving)", 12.0, true, COLOR_BLACK, 0.0);
        pdf.paragraph(
            &format!(
                "Calories: {}   Protein: {}   Carbs: {}   Fat: {}",
                nutrition.calories, nutrition.protein, nutrition.carbs, nutrition.fat
            ),
            10.0,
            false,
            COLOR_BLACK,
            0.0,
        );
    }

    let pages = pdf.save(output_path)?;
    tracing::info!(path = output_path, pages, "Exported recipe PDF");

    Ok(ExportPdfResponse {
        success: true,
        file_path: output_path.to_string(),
        pages,
        message: format!("Recipe \"{}\" exported", recipe.recipe_name),
    })
}

// ============================================================================
// Shopping List PDF
// ============================================================================

/// Write the user's shopping list, grouped by recipe in insertion order
pub fn shopping_list_pdf(
    db: &Database,
    user_id: &str,
    output_path: &str,
) -> Result<ExportPdfResponse, String> {
    let user_id = require_user(user_id)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let items = ShoppingListItem::list_for_user(&conn, user_id)
        .map_err(|e| format!("Failed to get shopping list: {}", e))?;
    drop(conn);

    if items.is_empty() {
        return Err("Shopping list is empty".to_string());
    }

    let mut groups: Vec<(&str, Vec<&ShoppingListItem>)> = Vec::new();
    for item in &items {
        match groups.iter_mut().find(|(name, _)| *name == item.recipe_name) {
            Some((_, group)) => group.push(item),
            None => groups.push((item.recipe_name.as_str(), vec![item])),
        }
    }

    let mut pdf = PdfWriter::new("Shopping List")?;
    pdf.paragraph("Shopping List", 20.0, true, COLOR_TITLE, 0.0);
    let remaining = items.iter().filter(|i| !i.checked).count();
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M");
    pdf.paragraph(
        &format!("{} items, {} still to buy. Generated {}", items.len(), remaining, now),
        10.0,
        false,
        COLOR_GRAY,
        0.0,
    );
    pdf.rule();

    for (recipe_name, group) in &groups {
        pdf.paragraph(recipe_name, 13.0, true, COLOR_BLACK, 0.0);
        for item in group {
            let (mark, color) = if item.checked {
                ("[x]", COLOR_GRAY)
            } else {
                ("[  ]", COLOR_BLACK)
            };
            pdf.paragraph(&format!("{} {}", mark, item.text), 11.0, false, color, 7.0);
        }
        pdf.gap(3.0);
    }

    let pages = pdf.save(output_path)?;
    tracing::info!(user_id, path = output_path, pages, "Exported shopping list PDF");

    Ok(ExportPdfResponse {
        success: true,
        file_path: output_path.to_string(),
        pages,
        message: format!("Shopping list exported with {} items", items.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_recipe;
    use crate::tools::shopping_list;

    #[test]
    fn test_share_text_format() {
        let recipe = Recipe {
            recipe_name: "Toast".to_string(),
            description: "Crunchy.".to_string(),
            ingredients: vec!["2 slices bread".to_string(), "1 tbsp butter".to_string()],
            instructions: vec!["Toast the bread.".to_string(), "Butter it.".to_string()],
            nutrition: None,
        };
        assert_eq!(
            share_text(&recipe),
            "Recipe: Toast\n\nCrunchy.\n\nIngredients:\n- 2 slices bread\n- 1 tbsp butter\n\n\
             Instructions:\n1. Toast the bread.\n2. Butter it."
        );
    }

    #[test]
    fn test_wrap_text() {
        let long = "word ".repeat(100);
        let lines = wrap_text(&long, 11.0, TEXT_WIDTH);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| !l.is_empty() && !l.ends_with(' ')));
        assert_eq!(lines.join(" ").split(' ').count(), 100);

        assert!(wrap_text("", 11.0, TEXT_WIDTH).is_empty());
    }

    #[test]
    fn test_recipe_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards").join("focaccia.pdf");
        let path = path.to_str().unwrap();

        let response = recipe_pdf(&sample_recipe("Focaccia"), path).unwrap();
        assert!(response.success);
        assert_eq!(response.pages, 1);

        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_recipe_spans_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.pdf");
        let mut recipe = sample_recipe("Feast");
        recipe.instructions = (0..120).map(|i| format!("Step number {} of the feast.", i)).collect();

        let response = recipe_pdf(&recipe, path.to_str().unwrap()).unwrap();
        assert!(response.pages > 1);
    }

    #[test]
    fn test_shopping_list_pdf() {
        let db = Database::in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.pdf");
        let path = path.to_str().unwrap();

        assert!(shopping_list_pdf(&db, "alice", path).is_err());

        let recipe = sample_recipe("Focaccia");
        shopping_list::add_recipe(&db, "alice", &recipe.recipe_name, &recipe.ingredients).unwrap();
        shopping_list::toggle_item(&db, "alice", "flour", "Focaccia").unwrap();

        let response = shopping_list_pdf(&db, "alice", path).unwrap();
        assert!(response.message.contains("3 items"));
        assert!(std::fs::read(path).unwrap().starts_with(b"%PDF"));
    }
}
