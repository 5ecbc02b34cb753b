use crate::extraction::{GeometryOptions, RawTable, Word};
use crate::parsing::header;
use std::cmp::Ordering;

/// A run of text with a horizontal extent.
///
/// For the bbox backend the extent is in points; for the layout backend it is
/// in character columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub x_min: f32,
    pub x_max: f32,
}

impl Span {
    pub fn center(&self) -> f32 {
        (self.x_min + self.x_max) / 2.0
    }

    /// Horizontal distance from `x` to this span; zero when inside.
    fn distance_to(&self, x: f32) -> f32 {
        if x < self.x_min {
            self.x_min - x
        } else if x > self.x_max {
            x - self.x_max
        } else {
            0.0
        }
    }
}

/// One visual line of a page: its words, and the same words merged into cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLine {
    /// Vertical position, growing down the page. Points for the bbox backend,
    /// line numbers for the layout backend.
    pub top: f32,
    pub words: Vec<Span>,
    pub cells: Vec<Span>,
}

impl TextLine {
    fn cell_texts(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }
}

/// Group positioned words into lines, top to bottom.
///
/// A word joins the current line when its vertical centre is within
/// `y_tolerance` of the line's mean centre.
pub fn group_lines(words: &[Word], options: &GeometryOptions) -> Vec<TextLine> {
    let mut sorted: Vec<&Word> = words.iter().collect();
    sorted.sort_by(|a, b| {
        a.bbox
            .y_min
            .total_cmp(&b.bbox.y_min)
            .then(a.bbox.x_min.total_cmp(&b.bbox.x_min))
    });

    let mut groups: Vec<Vec<&Word>> = Vec::new();
    let mut center_sum = 0.0_f32;

    for word in sorted {
        let joins = match groups.last() {
            Some(line) => {
                let mean = center_sum / line.len() as f32;
                (word.bbox.center_y() - mean).abs() <= options.y_tolerance
            }
            None => false,
        };

        if joins {
            center_sum += word.bbox.center_y();
            if let Some(line) = groups.last_mut() {
                line.push(word);
            }
        } else {
            center_sum = word.bbox.center_y();
            groups.push(vec![word]);
        }
    }

    groups
        .into_iter()
        .map(|mut line| {
            let top = line.iter().map(|w| w.bbox.center_y()).sum::<f32>() / line.len() as f32;
            line.sort_by(|a, b| a.bbox.x_min.total_cmp(&b.bbox.x_min));
            let cells = split_cells(&line, options.cell_gap_ratio);
            let words = line
                .iter()
                .map(|w| Span {
                    text: w.text.clone(),
                    x_min: w.bbox.x_min,
                    x_max: w.bbox.x_max,
                })
                .collect();
            TextLine { top, words, cells }
        })
        .collect()
}

/// Merge left-to-right sorted words of one line into cells.
fn split_cells(line: &[&Word], gap_ratio: f32) -> Vec<Span> {
    let max_gap = gap_ratio * median_height(line);
    let mut cells: Vec<Span> = Vec::new();

    for word in line {
        match cells.last_mut() {
            Some(cell) if word.bbox.x_min - cell.x_max <= max_gap => {
                cell.text.push(' ');
                cell.text.push_str(&word.text);
                cell.x_max = cell.x_max.max(word.bbox.x_max);
            }
            _ => cells.push(Span {
                text: word.text.clone(),
                x_min: word.bbox.x_min,
                x_max: word.bbox.x_max,
            }),
        }
    }

    cells
}

fn median_height(line: &[&Word]) -> f32 {
    let mut heights: Vec<f32> = line.iter().map(|w| w.bbox.height()).collect();
    heights.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    heights.get(heights.len() / 2).copied().unwrap_or(0.0)
}

/// Build lines from one page of `pdftotext -layout` text, using character
/// offsets as x coordinates and line numbers as y. Words split on any
/// whitespace, cells on runs of two or more.
pub fn layout_lines(page_text: &str) -> Vec<TextLine> {
    page_text
        .lines()
        .enumerate()
        .map(|(i, line)| TextLine {
            top: i as f32,
            words: spans_by_gap(line, 1),
            cells: spans_by_gap(line, 2),
        })
        .collect()
}

/// Split `line` at runs of at least `min_gap` whitespace characters.
fn spans_by_gap(line: &str, min_gap: usize) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut current: Option<(usize, String)> = None;
    let mut pending_ws = 0;
    let mut last_end = 0;

    for (col, c) in line.chars().enumerate() {
        if c.is_whitespace() {
            pending_ws += 1;
            continue;
        }

        if pending_ws >= min_gap {
            if let Some((start, text)) = current.take() {
                spans.push(Span {
                    text,
                    x_min: start as f32,
                    x_max: last_end as f32,
                });
            }
        }

        match current.as_mut() {
            Some((_, text)) => {
                for _ in 0..pending_ws {
                    text.push(' ');
                }
                text.push(c);
            }
            None => current = Some((col, c.to_string())),
        }
        pending_ws = 0;
        last_end = col + 1;
    }

    if let Some((start, text)) = current {
        spans.push(Span {
            text,
            x_min: start as f32,
            x_max: last_end as f32,
        });
    }

    spans
}

/// A gap between rows this many times the usual row pitch ends the table.
const REGION_GAP_FACTOR: f32 = 2.5;

/// Finds quote review tables in page lines.
///
/// A header line opens a table and fixes the column bands; following lines
/// are cut into those bands until a vertical gap much wider than the row
/// pitch so far (a footer, page number or trailing note). Bands carry over to
/// the next page, where the table resumes at the first line whose cells line
/// up with them.
#[derive(Debug, Default)]
pub struct TableDetector {
    bands: Option<Vec<Span>>,
    pitches: Vec<f32>,
}

#[derive(Debug, Clone, Copy)]
enum Region {
    /// Looking for a header, or for a continuation row under carried bands.
    Waiting,
    /// Inside a table; holds the top of the last row taken.
    Open(f32),
    /// The table ended on this page; only a new header starts another.
    Closed,
}

impl TableDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect the tables on one page. Lines must be in top-to-bottom order.
    pub fn detect_page(&mut self, lines: &[TextLine]) -> Vec<RawTable> {
        let mut tables = Vec::new();
        let mut current = RawTable::default();
        let mut region = Region::Waiting;

        for line in lines {
            if line.words.is_empty() {
                continue;
            }

            let texts = line.cell_texts();
            if header::is_header(&texts) {
                if !current.rows.is_empty() {
                    tables.push(std::mem::take(&mut current));
                }
                current
                    .rows
                    .push(texts.iter().map(|t| Some(t.to_string())).collect());
                self.bands = Some(line.cells.clone());
                self.pitches.clear();
                region = Region::Open(line.top);
                continue;
            }

            let Some(bands) = &self.bands else {
                continue;
            };

            match region {
                Region::Closed => continue,
                Region::Waiting => {
                    if !aligns_with_bands(&line.cells, bands) {
                        continue;
                    }
                }
                Region::Open(last_top) => {
                    let gap = line.top - last_top;
                    if ends_region(&self.pitches, gap) {
                        if !current.rows.is_empty() {
                            tables.push(std::mem::take(&mut current));
                        }
                        region = Region::Closed;
                        continue;
                    }
                    self.pitches.push(gap);
                }
            }

            current.rows.push(assign_to_bands(&line.words, bands));
            region = Region::Open(line.top);
        }

        if !current.rows.is_empty() {
            tables.push(current);
        }

        tables
    }
}

fn ends_region(pitches: &[f32], gap: f32) -> bool {
    let mut sorted = pitches.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    match sorted.get(sorted.len() / 2) {
        Some(median) => gap > REGION_GAP_FACTOR * median,
        None => false,
    }
}

/// Whether a line looks like a table row under `bands`: at least two cells,
/// each overlapping some band.
fn aligns_with_bands(cells: &[Span], bands: &[Span]) -> bool {
    cells.len() >= 2
        && cells.iter().all(|cell| {
            bands
                .iter()
                .any(|band| cell.x_min < band.x_max && cell.x_max > band.x_min)
        })
}

/// Cut a line into one cell per band. Each word goes to the band holding its
/// centre, else to the band with the nearest edge.
fn assign_to_bands(words: &[Span], bands: &[Span]) -> Vec<Option<String>> {
    let mut cells: Vec<Option<String>> = vec![None; bands.len()];

    for word in words {
        let center = word.center();
        let band = bands
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.distance_to(center)
                    .partial_cmp(&b.distance_to(center))
                    .unwrap_or(Ordering::Equal)
            })
            .map(|(i, _)| i);

        if let Some(i) = band {
            match &mut cells[i] {
                Some(text) => {
                    text.push(' ');
                    text.push_str(&word.text);
                }
                slot => *slot = Some(word.text.clone()),
            }
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::BBox;

    fn word(text: &str, x_min: f32, x_max: f32, y_min: f32) -> Word {
        Word {
            text: text.to_string(),
            bbox: BBox {
                x_min,
                y_min,
                x_max,
                y_max: y_min + 8.0,
            },
        }
    }

    fn cells(row: &[Option<String>]) -> Vec<&str> {
        row.iter().map(|c| c.as_deref().unwrap_or("")).collect()
    }

    #[test]
    fn test_group_lines_by_vertical_centre() {
        let words = vec![
            word("PX-22", 60.0, 85.0, 101.0),
            word("100234", 10.0, 40.0, 100.0),
            word("100235", 10.0, 40.0, 112.0),
        ];
        let lines = group_lines(&words, &GeometryOptions::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].words[0].text, "100234");
        assert_eq!(lines[0].words[1].text, "PX-22");
        assert_eq!(lines[1].words[0].text, "100235");
    }

    #[test]
    fn test_split_cells_merges_close_words() {
        // gap of 2pt (space) merges, gap of 20pt separates; height 8 -> max gap 4
        let words = vec![
            word("Customer", 100.0, 140.0, 50.0),
            word("Name", 142.0, 165.0, 50.0),
            word("State", 185.0, 205.0, 50.0),
        ];
        let lines = group_lines(&words, &GeometryOptions::default());
        let texts: Vec<&str> = lines[0].cells.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Customer Name", "State"]);
        assert_eq!(lines[0].cells[0].x_max, 165.0);
    }

    #[test]
    fn test_layout_line_spans() {
        let lines = layout_lines("  Quote #   PartNum    Customer Name\n\nnext");
        assert_eq!(lines.len(), 3);
        let cells: Vec<&str> = lines[0].cells.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(cells, vec!["Quote #", "PartNum", "Customer Name"]);
        assert_eq!(lines[0].cells[0].x_min, 2.0);
        assert_eq!(lines[0].cells[0].x_max, 9.0);
        assert_eq!(lines[0].words.len(), 5);
        assert!(lines[1].words.is_empty());
        assert_eq!(lines[2].top, 2.0);
    }

    #[test]
    fn test_detector_skips_lines_before_header() {
        let lines = layout_lines(
            "DAILY QUOTE REVIEW\n\
             Quote #    PartNum    State\n\
             100234     PX-22      NY",
        );
        let mut detector = TableDetector::new();
        let tables = detector.detect_page(&lines);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(cells(&tables[0].rows[1]), vec!["100234", "PX-22", "NY"]);
    }

    #[test]
    fn test_detector_leaves_missing_cells_empty() {
        let lines = layout_lines(
            "Quote #    PartNum    Description       State\n\
             100234                Blue widget       NY",
        );
        let tables = TableDetector::new().detect_page(&lines);
        assert_eq!(
            tables[0].rows[1],
            vec![
                Some("100234".to_string()),
                None,
                Some("Blue widget".to_string()),
                Some("NY".to_string()),
            ]
        );
    }

    #[test]
    fn test_detector_right_aligned_numbers() {
        let lines = layout_lines(
            "Quote #        Qty    ListEach\n\
             100234           2       19.99",
        );
        let tables = TableDetector::new().detect_page(&lines);
        assert_eq!(cells(&tables[0].rows[1]), vec!["100234", "2", "19.99"]);
    }

    #[test]
    fn test_detector_carries_bands_to_next_page() {
        let mut detector = TableDetector::new();
        assert!(detector
            .detect_page(&layout_lines("no table on this page"))
            .is_empty());

        detector.detect_page(&layout_lines("Quote #    State\n100234     NY"));
        let next = detector.detect_page(&layout_lines(
            "Continued from page 1\n\
             100235     IL\n\
             100236     CA",
        ));
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].rows.len(), 2);
        assert_eq!(cells(&next[0].rows[0]), vec!["100235", "IL"]);
    }

    #[test]
    fn test_detector_repeated_header_splits_tables() {
        let lines = layout_lines(
            "Quote #    State\n\
             100234     NY\n\
             Quote #    State\n\
             100235     IL",
        );
        let tables = TableDetector::new().detect_page(&lines);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].rows.len(), 2);
    }

    #[test]
    fn test_layout_footer_ends_table() {
        let lines = layout_lines(
            "Quote #    PartNum    State\n\
             100234     PX-22      NY\n\
             100235     PX-23      IL\n\
             \n\
             \n\
             \x20                     Page 1 of 2",
        );
        let tables = TableDetector::new().detect_page(&lines);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 3);
        assert!(tables[0]
            .rows
            .iter()
            .flatten()
            .flatten()
            .all(|c| !c.contains("Page")));
    }

    #[test]
    fn test_footer_after_single_row_ends_table() {
        let lines = layout_lines(
            "Quote #    PartNum    State\n\
             100234     PX-22      NY\n\
             \n\
             \n\
             \x20                     Page 1 of 2",
        );
        let tables = TableDetector::new().detect_page(&lines);
        assert_eq!(tables[0].rows.len(), 2);
    }

    #[test]
    fn test_closed_table_stays_closed_on_page() {
        let lines = layout_lines(
            "Quote #    State\n\
             100234     NY\n\
             100235     IL\n\
             \n\
             \n\
             \n\
             Notes      see terms",
        );
        let tables = TableDetector::new().detect_page(&lines);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 3);
    }

    #[test]
    fn test_bbox_footer_ends_table() {
        let words = vec![
            word("Quote", 10.0, 32.0, 50.0),
            word("#", 34.0, 38.0, 50.0),
            word("State", 100.0, 120.0, 50.0),
            word("100234", 10.0, 38.0, 62.0),
            word("NY", 100.0, 110.0, 62.0),
            word("100235", 10.0, 38.0, 74.0),
            word("IL", 100.0, 108.0, 74.0),
            word("Page", 90.0, 108.0, 560.0),
            word("1", 110.0, 114.0, 560.0),
        ];
        let lines = group_lines(&words, &GeometryOptions::default());
        let tables = TableDetector::new().detect_page(&lines);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 3);
        assert_eq!(cells(&tables[0].rows[2]), vec!["100235", "IL"]);
    }

    #[test]
    fn test_geometry_words_assigned_to_bands() {
        let words = vec![
            word("Quote", 10.0, 32.0, 50.0),
            word("#", 34.0, 38.0, 50.0),
            word("Customer", 100.0, 140.0, 50.0),
            word("Name", 142.0, 165.0, 50.0),
            word("100234", 10.0, 38.0, 62.0),
            word("Acme", 100.0, 120.0, 62.0),
            word("Inc", 122.0, 135.0, 62.0),
        ];
        let lines = group_lines(&words, &GeometryOptions::default());
        let tables = TableDetector::new().detect_page(&lines);
        assert_eq!(tables.len(), 1);
        assert_eq!(cells(&tables[0].rows[0]), vec!["Quote #", "Customer Name"]);
        assert_eq!(cells(&tables[0].rows[1]), vec!["100234", "Acme Inc"]);
    }
}
