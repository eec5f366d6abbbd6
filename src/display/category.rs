//! Category display formatting

use crate::models::Category;

/// Format categories as an aligned two-column list
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'gastos category create <NAME>' to add one.\n"
            .to_string();
    }

    let id_width = categories
        .iter()
        .map(|c| c.id.to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);

    let mut output = String::new();
    output.push_str(&format!("{:>id_width$}  {}\n", "ID", "Category"));
    output.push_str(&format!("{:->id_width$}  {:-<20}\n", "", ""));

    for category in categories {
        output.push_str(&format!("{:>id_width$}  {}\n", category.id, category.name));
    }

    output
}
