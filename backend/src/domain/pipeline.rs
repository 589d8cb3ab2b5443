//! Kanban pipeline classification.
//!
//! The PROCESS / status column is free text typed by editors. It is mapped
//! to one of the fixed [`PipelineStage`] columns here and nowhere else.

use shared::{DatedItem, PipelineBoard, PipelineColumn, PipelineStage};

/// Ordered rules, first match wins. Anything unmatched is a draft.
const RULES: [(PipelineStage, &[&str]); 3] = [
    (PipelineStage::Published, &["publish", "done", "selesai"]),
    (PipelineStage::Approved, &["approved", "acc"]),
    (PipelineStage::Review, &["review", "pending"]),
];

/// Map free process text to a stage. Total: every input has a stage.
pub fn classify(process_text: &str) -> PipelineStage {
    let lowered = process_text.to_lowercase();
    RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|needle| lowered.contains(needle)))
        .map(|(stage, _)| *stage)
        .unwrap_or(PipelineStage::Draft)
}

/// Group items into the four columns, keeping input order per column
pub fn build_board(items: &[DatedItem]) -> PipelineBoard {
    let mut columns: Vec<PipelineColumn> = PipelineStage::ALL
        .into_iter()
        .map(|stage| PipelineColumn {
            stage,
            items: Vec::new(),
        })
        .collect();

    for item in items {
        let stage = classify(&item.process);
        if let Some(column) = columns.iter_mut().find(|column| column.stage == stage) {
            column.items.push(item.clone());
        }
    }

    PipelineBoard { columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ItemKind;

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify("Sudah Publish ke Instagram"), PipelineStage::Published);
        assert_eq!(classify("Menunggu Review Atasan"), PipelineStage::Review);
        assert_eq!(classify(""), PipelineStage::Draft);
        assert_eq!(classify("Approved oleh admin"), PipelineStage::Approved);
    }

    #[test]
    fn test_classify_rule_order() {
        // published outranks approved and review
        assert_eq!(classify("approved, published"), PipelineStage::Published);
        assert_eq!(classify("Selesai review"), PipelineStage::Published);
        // approved outranks review
        assert_eq!(classify("review ACC"), PipelineStage::Approved);
        assert_eq!(classify("DONE"), PipelineStage::Published);
        assert_eq!(classify("pending"), PipelineStage::Review);
        assert_eq!(classify("sedang ditulis"), PipelineStage::Draft);
    }

    #[test]
    fn test_process_labels_classify_to_their_stage() {
        for stage in PipelineStage::ALL {
            assert_eq!(classify(stage.process_label()), stage);
        }
    }

    #[test]
    fn test_build_board_preserves_order() {
        let item = |id: &str, process: &str| DatedItem {
            id: id.to_string(),
            title: id.to_string(),
            category: String::new(),
            raw_date: String::new(),
            kind: ItemKind::Content,
            process: process.to_string(),
            pic: None,
        };
        let items = vec![
            item("a", "review"),
            item("b", ""),
            item("c", "Pending Review"),
            item("d", "selesai"),
        ];

        let board = build_board(&items);
        assert_eq!(board.columns.len(), 4);
        let ids = |stage: PipelineStage| -> Vec<String> {
            board
                .columns
                .iter()
                .find(|column| column.stage == stage)
                .map(|column| column.items.iter().map(|i| i.id.clone()).collect())
                .unwrap_or_default()
        };
        assert_eq!(ids(PipelineStage::Draft), vec!["b"]);
        assert_eq!(ids(PipelineStage::Review), vec!["a", "c"]);
        assert!(ids(PipelineStage::Approved).is_empty());
        assert_eq!(ids(PipelineStage::Published), vec!["d"]);
    }
}
