//! Incremental recalculation engine
//!
//! An edit moves through four stages:
//!
//! 1. Validate: the target name and the new contents are parsed. Nothing has
//!    changed yet, so a failure here has no side effect.
//! 2. Rewire: the target's dependee edges are replaced by the variables of the
//!    new contents (none for numbers and text).
//! 3. Order: the target and everything depending on it are topologically
//!    ordered. A cycle restores the previous edges and rejects the edit.
//! 4. Commit: the new contents are stored and each affected cell is
//!    re-evaluated in order, reading the freshly cached values of its
//!    dependees.

use std::collections::BTreeSet;

use cellcalc_core::{
    CellContents, CellStore, CellValue, DependencyGraph, Error, NameValidator, Result,
};
use cellcalc_formula::Formula;
use log::{debug, trace};

use crate::options::SpreadsheetOptions;

/// A set of named cells kept consistent under edits
///
/// The spreadsheet is single-threaded: each edit runs to completion before
/// the next one starts. To share one between threads, guard the whole value
/// with a lock; intermediate states inside an edit are never observable
/// through `&self`.
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    options: SpreadsheetOptions,
    validator: NameValidator,
    graph: DependencyGraph,
    store: CellStore,
    changed: bool,
}

impl Default for Spreadsheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Spreadsheet {
    /// Create an empty spreadsheet with default options
    pub fn new() -> Self {
        Self::with_options(SpreadsheetOptions::default())
    }

    pub fn with_options(options: SpreadsheetOptions) -> Self {
        let validator = options.name_validator();
        Self {
            options,
            validator,
            graph: DependencyGraph::new(),
            store: CellStore::new(),
            changed: false,
        }
    }

    /// Build a spreadsheet by replaying `(name, raw_text)` pairs in order
    ///
    /// Stops at the first pair that [`set_contents`](Self::set_contents)
    /// rejects. The result starts out unchanged.
    pub fn from_pairs<I, N, T>(options: SpreadsheetOptions, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, T)>,
        N: AsRef<str>,
        T: AsRef<str>,
    {
        let mut sheet = Self::with_options(options);
        for (name, raw_text) in pairs {
            sheet.set_contents(name.as_ref(), raw_text.as_ref())?;
        }
        sheet.changed = false;
        Ok(sheet)
    }

    pub fn options(&self) -> &SpreadsheetOptions {
        &self.options
    }

    /// Set the contents of a cell from raw text
    ///
    /// If `raw_text` parses as a finite number the cell holds that number. If
    /// it starts with the formula marker, the rest is parsed as a formula
    /// whose variables must be valid cell names. Otherwise the cell holds the
    /// text; empty text empties the cell.
    ///
    /// Returns the edited cell plus every cell that depends on it, directly
    /// or indirectly.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `name` is empty
    /// - [`Error::InvalidName`] if `name` is not a valid cell name
    /// - [`Error::Formula`] if the formula cannot be parsed
    /// - [`Error::CircularDependency`] if the edit would create a cycle
    ///
    /// On error the spreadsheet is left exactly as it was.
    pub fn set_contents(&mut self, name: &str, raw_text: &str) -> Result<BTreeSet<String>> {
        let name = self.checked_name(name).map_err(|err| {
            debug!("rejected edit of {:?}: {}", name, err);
            err
        })?;
        let contents = self.parse_contents(raw_text).map_err(|err| {
            debug!("rejected edit of {}: {}", name, err);
            err
        })?;
        let order = self.rewire(&name, &contents)?;
        self.commit(&name, contents, &order)?;
        self.changed = true;

        debug!("set {}: recalculated {} cell(s)", name, order.len());
        Ok(order.into_iter().collect())
    }

    /// Contents of a cell; empty text if the cell was never set
    pub fn get_contents(&self, name: &str) -> &CellContents {
        self.store.contents(&self.options.normalize(name))
    }

    /// Value of a cell; empty text if the cell was never set
    pub fn get_value(&self, name: &str) -> &CellValue {
        self.store.value(&self.options.normalize(name))
    }

    /// Names of all non-empty cells, in no particular order
    pub fn nonempty_cells(&self) -> impl Iterator<Item = &str> + '_ {
        self.store.names()
    }

    /// Names of the cells whose formulas reference `name` directly
    pub fn direct_dependents(&self, name: &str) -> Result<BTreeSet<String>> {
        let name = self.options.normalize(name);
        Ok(self
            .graph
            .get_dependents(&name)?
            .map(str::to_owned)
            .collect())
    }

    /// `(name, raw_text)` for every non-empty cell, sorted by name
    ///
    /// Replaying the pairs through [`from_pairs`](Self::from_pairs) with the
    /// same options reproduces every cell's contents.
    pub fn contents_pairs(&self) -> Vec<(String, String)> {
        let marker = self.options.formula_marker;
        let mut pairs: Vec<(String, String)> = self
            .store
            .iter()
            .map(|(name, cell)| (name.to_string(), cell.contents().to_raw_text(marker)))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    /// True if an edit succeeded since creation or the last [`mark_saved`](Self::mark_saved)
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn mark_saved(&mut self) {
        self.changed = false;
    }

    /// Number of non-empty cells
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    fn checked_name(&self, name: &str) -> Result<String> {
        if name.is_empty() {
            return Err(Error::invalid_argument("cell name must not be empty"));
        }
        let normalized = self.options.normalize(name);
        if !self.validator.is_valid(&normalized) {
            return Err(Error::InvalidName(name.to_string()));
        }
        Ok(normalized)
    }

    fn parse_contents(&self, raw_text: &str) -> Result<CellContents> {
        if let Ok(n) = raw_text.trim().parse::<f64>() {
            if n.is_finite() {
                return Ok(CellContents::Number(n));
            }
        }

        if let Some(body) = raw_text.strip_prefix(self.options.formula_marker) {
            let formula = Formula::with_normalizer(
                body,
                |var| self.options.normalize(var),
                |var| self.validator.is_valid(var),
            )?;
            return Ok(CellContents::Formula(formula));
        }

        Ok(CellContents::Text(raw_text.to_string()))
    }

    /// Point `name`'s dependee edges at the new contents' variables and
    /// compute the recalculation order, restoring the old edges on a cycle
    fn rewire(&mut self, name: &str, contents: &CellContents) -> Result<Vec<String>> {
        let previous: Vec<String> = self.graph.get_dependees(name)?.map(str::to_owned).collect();
        self.graph.replace_dependees(name, contents.dependencies())?;

        match self.graph.recalc_order(name) {
            Ok(order) => Ok(order),
            Err(err) => {
                self.graph.replace_dependees(name, previous)?;
                debug!("rejected edit of {}: {}", name, err);
                Err(err)
            }
        }
    }

    fn commit(&mut self, name: &str, contents: CellContents, order: &[String]) -> Result<()> {
        self.store.set_contents(name, contents)?;

        for cell in order {
            // An emptied target is no longer stored and has nothing to compute
            if !self.store.contains(cell) {
                continue;
            }
            let value = self
                .store
                .reevaluate(cell, |store, var| store.numeric_value(var))?;
            match value {
                CellValue::Error(err) => debug!("{} evaluated to an error: {}", cell, err),
                other => trace!("{} = {}", cell, other),
            }
        }
        Ok(())
    }
}
