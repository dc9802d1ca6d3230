use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use rulesync_common::{RuleCategory, RuleEntity, SyncRule};

fn build_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold)),
        );
    table
}

/// One row per rule, in stored order. Only the bare record is shown; the
/// machine decoration is the same for every row.
pub fn rule_table<R: SyncRule>(rules: &[RuleEntity<R>]) -> serde_json::Result<Table> {
    let mut table = build_table(&["#", "Resource", "Rule"]);
    for (i, entity) in rules.iter().enumerate() {
        let resource = match entity.rule().resource() {
            "" => Cell::new("-").add_attribute(Attribute::Dim),
            name => Cell::new(name).fg(Color::White),
        };
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            resource,
            Cell::new(serde_json::to_string(entity.rule())?),
        ]);
    }
    Ok(table)
}

/// Store key rows, one per category, with the group dimmed.
pub fn key_table<'a>(rows: impl IntoIterator<Item = (RuleCategory, &'a str, &'a str)>) -> Table {
    let mut table = build_table(&["Category", "Data ID", "Group"]);
    for (category, data_id, group) in rows {
        table.add_row(vec![
            Cell::new(category).fg(Color::Green),
            Cell::new(data_id),
            Cell::new(group).add_attribute(Attribute::Dim),
        ]);
    }
    table
}
