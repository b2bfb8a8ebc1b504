//! Book type - an ordered collection of sheets

use crate::error::{Error, Result};
use crate::sheet::Sheet;
use crate::MAX_SHEET_NAME_LEN;

/// A book: the sheets of one record collection, in display order
///
/// Sheet names are unique (case-insensitive), as in a spreadsheet workbook.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Book {
    /// Sheets in display order
    sheets: Vec<Sheet>,
}

impl Book {
    /// Create an empty book with no sheets
    pub fn new() -> Self {
        Self { sheets: Vec::new() }
    }

    /// Check if the book has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Check if a sheet with this exact name exists
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Get the index of a sheet by name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.name() == name)
    }

    /// Get a sheet by name
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    /// Get a mutable sheet by name
    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name() == name)
    }

    /// Iterate over all sheets in display order
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    /// Sheet names in display order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }

    /// Append a new, empty sheet
    pub fn add_sheet(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;
        self.sheets.push(Sheet::new(name));
        Ok(self.sheets.len() - 1)
    }

    /// Append an existing sheet
    pub fn add_existing_sheet(&mut self, sheet: Sheet) -> Result<usize> {
        self.validate_sheet_name(sheet.name())?;
        self.sheets.push(sheet);
        Ok(self.sheets.len() - 1)
    }

    /// Append a copy of `template` named `new_name`
    pub fn copy_sheet(&mut self, template: &str, new_name: &str) -> Result<usize> {
        let mut copy = self
            .sheet(template)
            .cloned()
            .ok_or_else(|| Error::SheetNotFound(template.into()))?;
        copy.set_name(new_name);
        self.add_existing_sheet(copy)
    }

    /// Move `name` so that it sits immediately before `relative_to`
    pub fn move_before(&mut self, name: &str, relative_to: &str) -> Result<()> {
        if name == relative_to {
            return Ok(());
        }
        let from = self
            .position(name)
            .ok_or_else(|| Error::SheetNotFound(name.into()))?;
        if !self.contains(relative_to) {
            return Err(Error::SheetNotFound(relative_to.into()));
        }

        let sheet = self.sheets.remove(from);
        // Position is looked up again because the removal may have shifted it
        let to = self.position(relative_to).unwrap_or(self.sheets.len());
        self.sheets.insert(to, sheet);
        Ok(())
    }

    /// Validate a sheet name
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        for c in INVALID_CHARS {
            if name.contains(*c) {
                return Err(Error::InvalidSheetName(format!(
                    "Sheet name cannot contain '{}'",
                    c
                )));
            }
        }

        // Check for duplicate names (case-insensitive)
        let name_lower = name.to_lowercase();
        if self
            .sheets
            .iter()
            .any(|s| s.name().to_lowercase() == name_lower)
        {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}
