mod common;

use common::{columns, geometry, short_row, tall_row, MONO};
use pdf_tabulate::layout::{DryRun, PaginationPlan, Row, TableLayout};
use pdf_tabulate::{ConfigurationError, Pt, ReportError};

fn estimate(rows: &[Row], signers: usize) -> Result<PaginationPlan, ReportError> {
    let geometry = geometry();
    let columns = columns();
    TableLayout::new(&MONO, &columns, &geometry).estimate(rows, signers)
}

#[test]
fn forty_five_rows_split_twenty_twenty_five() {
    let plan = estimate(&vec![short_row(); 45], 2).expect("can paginate");
    assert_eq!(plan.per_page_row_counts, vec![20, 20, 5]);
    assert!(!plan.trailing_block_on_own_page);
    assert_eq!(plan.total_pages, 3);
    assert_eq!(plan.last_row_end_y, Pt(310.0));
}

#[test]
fn a_full_last_page_pushes_the_trailing_block_onto_a_new_page() {
    let plan = estimate(&vec![short_row(); 40], 2).expect("can paginate");
    assert_eq!(plan.per_page_row_counts, vec![20, 20]);
    assert!(plan.trailing_block_on_own_page);
    assert_eq!(plan.total_pages, 3);
}

#[test]
fn the_trailing_block_fits_exactly_at_the_boundary() {
    let columns = columns();
    let rows = vec![short_row()];

    // margin + title band + header band + one row + summary and signers + margin
    let exact = geometry().trailing_block_height(2) + Pt(10.0 + 10.0 + 20.0 + 20.0 + 10.0);
    let mut geometry = geometry();
    geometry.page_height = exact;
    let plan = TableLayout::new(&MONO, &columns, &geometry)
        .estimate(&rows, 2)
        .expect("can paginate");
    assert_eq!(plan.total_pages, 1);
    assert!(!plan.trailing_block_on_own_page);

    geometry.page_height = exact - Pt(1.0);
    let plan = TableLayout::new(&MONO, &columns, &geometry)
        .estimate(&rows, 2)
        .expect("can paginate");
    assert_eq!(plan.total_pages, 2);
    assert!(plan.trailing_block_on_own_page);
}

#[test]
fn no_signers_shrink_the_trailing_block() {
    let geometry = geometry();
    assert_eq!(geometry.trailing_block_height(0), Pt(30.0));
    assert_eq!(geometry.trailing_block_height(3), Pt(120.0));

    // 38 rows leave 40pt below the last row
    let plan = estimate(&vec![short_row(); 38], 0).expect("can paginate");
    assert_eq!(plan.per_page_row_counts, vec![20, 18]);
    assert!(!plan.trailing_block_on_own_page);

    let plan = estimate(&vec![short_row(); 38], 1).expect("can paginate");
    assert!(plan.trailing_block_on_own_page);
}

#[test]
fn an_oversized_trailing_block_is_a_configuration_error() {
    let columns = columns();
    let geometry = geometry().with_trailing_block(Pt(20.0), Pt(400.0), Pt(10.0));
    let result = TableLayout::new(&MONO, &columns, &geometry).estimate(&[short_row()], 1);
    assert!(matches!(
        result,
        Err(ReportError::Configuration(ConfigurationError::TrailingBlockTooTall { .. }))
    ));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn every_row_lands_on_exactly_one_page(lines in prop::collection::vec(1usize..=20, 1..120), signers in 0usize..4) {
            let rows: Vec<Row> = lines.iter().map(|&n| tall_row(n)).collect();
            let plan = estimate(&rows, signers).expect("can paginate");

            prop_assert_eq!(plan.per_page_row_counts.iter().sum::<usize>(), rows.len());
            prop_assert!(plan.per_page_row_counts.iter().all(|&count| count > 0));
            prop_assert_eq!(
                plan.total_pages,
                plan.per_page_row_counts.len() + usize::from(plan.trailing_block_on_own_page)
            );
        }

        #[test]
        fn pages_break_only_when_the_next_row_would_cross_the_margin(lines in prop::collection::vec(1usize..=20, 1..120)) {
            let geometry = geometry();
            let columns = columns();
            let layout = TableLayout::new(&MONO, &columns, &geometry);
            let rows: Vec<Row> = lines.iter().map(|&n| tall_row(n)).collect();
            let plan = layout.estimate(&rows, 2).expect("can paginate");

            let mut next = 0;
            for (page, &count) in plan.per_page_row_counts.iter().enumerate() {
                let top = geometry.content_top() - geometry.top_reserve(page == 0) - geometry.header_band_height;
                let room = top - geometry.margin;
                let used: Pt = rows[next..next + count].iter().map(|row| layout.row_height(row)).sum();
                prop_assert!(used <= room);

                if let Some(following) = rows.get(next + count) {
                    prop_assert!(used + layout.row_height(following) > room);
                }
                next += count;
            }
        }

        #[test]
        fn the_drawing_pass_matches_the_dry_run(count in 1usize..200) {
            let geometry = geometry();
            let columns = columns();
            let layout = TableLayout::new(&MONO, &columns, &geometry);
            let rows = vec![short_row(); count];
            let plan = layout.estimate(&rows, 2).expect("can paginate");

            let mut next = 0;
            for (page, &planned) in plan.per_page_row_counts.iter().enumerate() {
                let drawn = layout
                    .plan_page(&rows[next..], next, geometry.content_top(), page == 0, &mut DryRun)
                    .expect("rows fit");
                prop_assert_eq!(drawn.rows_consumed, planned);
                next += drawn.rows_consumed;
            }
            prop_assert_eq!(next, count);
        }
    }
}
