//! Feature control table display

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};

use crate::pipeline::FeatureControls;
use crate::status;

/// Render the prediction form: bounds, step, default and current value per feature
pub fn controls_table(form: &FeatureControls) -> Table {
    let current = form.vector();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new("Min").add_attribute(Attribute::Bold),
        Cell::new("Max").add_attribute(Attribute::Bold),
        Cell::new("Step").add_attribute(Attribute::Bold),
        Cell::new("Default").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    for (control, value) in form.controls().iter().zip(current.iter()) {
        let value_cell = Cell::new(value).set_alignment(CellAlignment::Right);
        let value_cell = if control.contains(*value) {
            value_cell
        } else {
            value_cell.fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(control.name),
            Cell::new(control.min).set_alignment(CellAlignment::Right),
            Cell::new(control.max).set_alignment(CellAlignment::Right),
            Cell::new(control.step).set_alignment(CellAlignment::Right),
            Cell::new(control.default).set_alignment(CellAlignment::Right),
            value_cell,
        ]);
    }

    table
}

/// Print the controls table indented to match the rest of the output
pub fn display_controls(form: &FeatureControls) {
    for line in controls_table(form).to_string().lines() {
        status!("    {}", line);
    }
}
