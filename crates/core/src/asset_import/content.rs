//! Content import: user-authored spreadsheets.
//!
//! Only `title` is required. Known columns are matched case-insensitively;
//! columns named `cf:<Field Name>` carry custom field values; any other
//! column is ignored.
//!
//! ```text
//! title,description,category,location,tags,valuation,cf:Serial Number
//! Laptop,Dell XPS,Electronics,HQ,"it, loaner",1299,SN-123
//! ```

use std::collections::HashSet;

use super::error::{ImportError, RowError};
use super::extract::{non_blank, parse_valuation, RowExtractor};
use super::reader::RawRow;
use super::records::{ContentImportRecord, NamedFieldValue};

pub const COL_TITLE: &str = "title";
pub const COL_DESCRIPTION: &str = "description";
pub const COL_CATEGORY: &str = "category";
pub const COL_LOCATION: &str = "location";
pub const COL_TAGS: &str = "tags";
pub const COL_VALUATION: &str = "valuation";

/// Prefix marking a custom field column.
pub const CUSTOM_FIELD_PREFIX: &str = "cf:";

/// Column positions resolved from a content header.
#[derive(Debug, Clone, Default)]
pub struct ContentLayout {
    title: usize,
    description: Option<usize>,
    category: Option<usize>,
    location: Option<usize>,
    tags: Option<usize>,
    valuation: Option<usize>,
    custom_fields: Vec<(usize, String)>,
}

/// Extractor for the `content` intent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentExtractor;

impl RowExtractor for ContentExtractor {
    type Record = ContentImportRecord;
    type Layout = ContentLayout;

    fn layout(&self, header: &RawRow) -> Result<ContentLayout, ImportError> {
        let mut title = None;
        let mut layout = ContentLayout::default();
        let mut seen_fields = HashSet::new();

        for (position, cell) in header.cells.iter().enumerate() {
            let name = cell.trim();
            let lower = name.to_lowercase();

            if let Some(rest) = strip_custom_field_prefix(name) {
                let field = rest.trim();
                if field.is_empty() {
                    return Err(mismatch(name, "custom field column needs a name after 'cf:'"));
                }
                if !seen_fields.insert(field.to_string()) {
                    return Err(mismatch(name, "column appears more than once"));
                }
                layout.custom_fields.push((position, field.to_string()));
                continue;
            }

            let slot = match lower.as_str() {
                COL_TITLE => &mut title,
                COL_DESCRIPTION => &mut layout.description,
                COL_CATEGORY => &mut layout.category,
                COL_LOCATION => &mut layout.location,
                COL_TAGS => &mut layout.tags,
                COL_VALUATION => &mut layout.valuation,
                _ => continue,
            };
            if slot.replace(position).is_some() {
                return Err(mismatch(name, "column appears more than once"));
            }
        }

        layout.title = title.ok_or_else(|| mismatch(COL_TITLE, "required column is missing"))?;
        Ok(layout)
    }

    fn map_row(&self, layout: &ContentLayout, row: &RawRow) -> Result<ContentImportRecord, RowError> {
        let optional = |column: Option<usize>| column.and_then(|c| non_blank(row.cell(c)));

        let title = non_blank(row.cell(layout.title))
            .ok_or(RowError::RequiredFieldMissing { field: COL_TITLE })?;

        let valuation = match layout.valuation {
            Some(c) => parse_valuation(COL_VALUATION, row.cell(c))?,
            None => None,
        };

        let tags = layout
            .tags
            .map(|c| split_tags(row.cell(c)))
            .unwrap_or_default();

        let custom_fields = layout
            .custom_fields
            .iter()
            .filter_map(|(c, name)| {
                non_blank(row.cell(*c)).map(|value| NamedFieldValue {
                    name: name.clone(),
                    value,
                })
            })
            .collect();

        Ok(ContentImportRecord {
            title,
            description: optional(layout.description),
            category: optional(layout.category),
            location: optional(layout.location),
            tags,
            valuation,
            custom_fields,
        })
    }
}

/// Split a comma separated tag cell, dropping blanks and repeats.
fn split_tags(cell: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    cell.split(',')
        .filter_map(non_blank)
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// The part after a case-insensitive `cf:` prefix, if present.
fn strip_custom_field_prefix(name: &str) -> Option<&str> {
    let prefix_len = CUSTOM_FIELD_PREFIX.len();
    name.get(..prefix_len)
        .filter(|p| p.eq_ignore_ascii_case(CUSTOM_FIELD_PREFIX))
        .map(|_| &name[prefix_len..])
}

fn mismatch(column: &str, reason: &str) -> ImportError {
    ImportError::SchemaMismatch {
        column: column.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_import::reader::read_rows;
    use assert_matches::assert_matches;

    fn extract(csv: &str) -> Result<crate::asset_import::extract::Extraction<ContentImportRecord>, ImportError> {
        ContentExtractor.extract(&read_rows(csv.as_bytes()).unwrap())
    }

    #[test]
    fn produces_one_record_per_data_row_in_order() {
        let extraction = extract(
            "title,category,location,description\n\
             Laptop,Electronics,HQ,Dell XPS\n\
             Desk,Furniture,HQ,Standing\n\
             Van,Vehicles,Depot,\n",
        )
        .unwrap();

        assert!(extraction.failures.is_empty());
        let titles: Vec<_> = extraction.records.iter().map(|r| r.record.title.as_str()).collect();
        assert_eq!(titles, vec!["Laptop", "Desk", "Van"]);
        let rows: Vec<_> = extraction.records.iter().map(|r| r.row_index).collect();
        assert_eq!(rows, vec![1, 2, 3]);

        let laptop = &extraction.records[0].record;
        assert_eq!(laptop.category.as_deref(), Some("Electronics"));
        assert_eq!(laptop.location.as_deref(), Some("HQ"));
        assert_eq!(laptop.description.as_deref(), Some("Dell XPS"));
        assert_eq!(extraction.records[2].record.description, None);
    }

    #[test]
    fn missing_title_fails_only_that_row() {
        let extraction = extract(
            "title,category,location,description\n\
             Laptop,Electronics,HQ,Dell XPS\n\
             ,Electronics,HQ,missing title\n\
             Monitor,Electronics,HQ,\n",
        )
        .unwrap();

        assert_eq!(extraction.records.len(), 2);
        assert_eq!(extraction.failures.len(), 1);
        let failure = &extraction.failures[0];
        assert_eq!(failure.row_index, 2);
        assert_eq!(failure.code, "REQUIRED_FIELD_MISSING");
        assert_eq!(failure.message, "Missing required field: title");
        assert_eq!(extraction.records[1].record.title, "Monitor");
    }

    #[test]
    fn header_without_title_is_schema_mismatch() {
        assert_matches!(
            extract("name,category\nLaptop,Electronics\n"),
            Err(ImportError::SchemaMismatch { ref column, .. }) if column == "title"
        );
    }

    #[test]
    fn duplicate_known_column_is_schema_mismatch() {
        assert_matches!(
            extract("title,Category,category\nLaptop,A,B\n"),
            Err(ImportError::SchemaMismatch { ref column, .. }) if column == "category"
        );
    }

    #[test]
    fn header_names_are_case_insensitive_and_unknown_ignored() {
        let extraction = extract("Title,CATEGORY,notes\nLaptop,Electronics,ignored\n").unwrap();
        let record = &extraction.records[0].record;
        assert_eq!(record.title, "Laptop");
        assert_eq!(record.category.as_deref(), Some("Electronics"));
    }

    #[test]
    fn custom_field_columns_are_collected() {
        let extraction = extract(
            "title,cf:Serial Number,cf:Warranty\n\
             Laptop,SN-1,\n",
        )
        .unwrap();
        let record = &extraction.records[0].record;
        assert_eq!(
            record.custom_fields,
            vec![NamedFieldValue {
                name: "Serial Number".into(),
                value: "SN-1".into()
            }]
        );
    }

    #[test]
    fn empty_custom_field_name_is_schema_mismatch() {
        assert_matches!(
            extract("title,cf: \nLaptop,x\n"),
            Err(ImportError::SchemaMismatch { .. })
        );
    }

    #[test]
    fn tags_are_split_and_deduplicated() {
        let extraction = extract("title,tags\nLaptop,\"it, loaner,, it\"\n").unwrap();
        assert_eq!(extraction.records[0].record.tags, vec!["it", "loaner"]);
    }

    #[test]
    fn bad_valuation_is_a_row_failure() {
        let extraction = extract("title,valuation\nLaptop,lots\nDesk,$250\n").unwrap();
        assert_eq!(extraction.failures.len(), 1);
        assert_eq!(extraction.failures[0].code, "INVALID_VALUE");
        assert_eq!(extraction.records[0].record.valuation, Some(250.0));
    }

    #[test]
    fn short_rows_read_missing_cells_as_blank() {
        let extraction = extract("title,category,location\nLaptop\n").unwrap();
        let record = &extraction.records[0].record;
        assert_eq!(record.category, None);
        assert_eq!(record.location, None);
    }
}
