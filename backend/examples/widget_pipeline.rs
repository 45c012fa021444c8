//! Walk a heatmap payload through the transformation pipeline and print
//! the widget configuration plus a few tooltip resolutions.
//!
//! ```bash
//! cargo run --example widget_pipeline
//! ```

use serde_json::json;

use keyviz::models::heatmap::parse_heatmap_response;
use keyviz::services::{build_matrix, build_widget_config, CellPosition};

fn main() -> anyhow::Result<()> {
    let payload = json!({
        "heatmaps": [
            {
                "labels": ["shop", "orders"],
                "ranges": [
                    {"start": {"desc": "aa", "table_id": 44}, "end": {"desc": "bb", "table_id": 45}}
                ],
                "values": [[120, 80, 0, 35]]
            },
            {
                "labels": ["shop", "orders", "k_user"],
                "ranges": [
                    {"start": "bb", "end": "cc"},
                    {"start": "cc", "end": "dd"}
                ],
                "values": [[4, 0, 9, 2], [60, 61, 58, 70]]
            }
        ]
    })
    .to_string();

    let response = parse_heatmap_response(&payload)?;
    let matrix = build_matrix(&response)?;
    let context = build_widget_config(matrix, &response);

    println!("widget network data:");
    println!("{}", serde_json::to_string_pretty(&context.config)?);

    println!("\nrow tooltips:");
    for row in 0..context.config.row_nodes.len() {
        println!("  row {row}: {}", context.snapshot.row_tooltip(row));
    }

    let cell = CellPosition { pos_x: 2, pos_y: 2 };
    let value = context.config.mat[cell.pos_y][cell.pos_x];
    println!("\ncell tooltip at (2, 2):");
    println!("  {}", context.snapshot.cell_tooltip(&cell, value));

    Ok(())
}
