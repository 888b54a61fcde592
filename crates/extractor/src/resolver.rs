//! Alias resolution: table reference strings → canonical tables.

use model::{core::table::Table, workbook::datasource::TableRef};
use std::collections::HashMap;

/// Stable identifier for a table within one resolver/graph. Positions follow
/// first-seen order of the underlying table list.
pub type TableId = usize;

/// Maps table reference strings to canonical tables.
///
/// Identity is the (physical_name, display_alias) pair: two references hit
/// the same table only when both parts match. Matching is case-insensitive
/// and whitespace-sensitive; the original casing of the first appearance is
/// what later gets rendered. Role-played tables (same physical name under two
/// aliases) stay distinct tables.
pub struct AliasResolver {
    tables: Vec<Table>,
    /// Lowercased display alias → position in `tables`. First appearance of
    /// an alias wins; the alias is unique per data source by invariant.
    by_alias: HashMap<String, TableId>,
    primary_alias: Option<String>,
}

impl AliasResolver {
    /// Builds the resolver from the data source's ordered table references,
    /// deduplicating on the (physical, alias) pair while preserving
    /// first-seen order.
    pub fn from_table_refs(refs: &[TableRef]) -> Self {
        let mut tables: Vec<Table> = Vec::new();
        let mut by_pair: HashMap<(String, String), TableId> = HashMap::new();
        let mut by_alias: HashMap<String, TableId> = HashMap::new();
        let mut primary_alias = None;

        for table_ref in refs {
            let pair_key = (
                table_ref.physical_name.to_lowercase(),
                table_ref.alias.to_lowercase(),
            );
            if by_pair.contains_key(&pair_key) {
                continue;
            }

            let id = tables.len();
            let mut table = Table::new(&table_ref.physical_name, &table_ref.alias);
            table.kind = table_ref.kind;
            tables.push(table);

            by_pair.insert(pair_key, id);
            by_alias.entry(table_ref.alias.to_lowercase()).or_insert(id);

            if table_ref.primary && primary_alias.is_none() {
                primary_alias = Some(table_ref.alias.clone());
            }
        }

        AliasResolver {
            tables,
            by_alias,
            primary_alias,
        }
    }

    /// Resolves a reference string to a table id.
    ///
    /// References may arrive wrapped in the quoting of their source context
    /// (`"Home Teams"` or `[Home Teams]`); the wrapper is stripped, the text
    /// inside is preserved verbatim.
    pub fn resolve(&self, reference: &str) -> Option<TableId> {
        let unquoted = strip_quoting(reference);
        self.by_alias.get(&unquoted.to_lowercase()).copied()
    }

    pub fn table(&self, id: TableId) -> &Table {
        &self.tables[id]
    }

    pub fn table_mut(&mut self, id: TableId) -> &mut Table {
        &mut self.tables[id]
    }

    /// Aliases that share a physical table, grouped for informational output.
    /// Groups are never used to merge fields.
    pub fn role_played_groups(&self) -> Vec<Vec<String>> {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for table in &self.tables {
            let key = table.physical_name.to_lowercase();
            match groups.iter_mut().find(|(physical, _)| *physical == key) {
                Some((_, aliases)) => aliases.push(table.display_alias.clone()),
                None => groups.push((key, vec![table.display_alias.clone()])),
            }
        }
        groups
            .into_iter()
            .filter(|(_, aliases)| aliases.len() > 1)
            .map(|(_, aliases)| aliases)
            .collect()
    }

    /// All tables in first-seen order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// The alias marked as the data source's primary connection, if any.
    pub fn primary_alias(&self) -> Option<&str> {
        self.primary_alias.as_deref()
    }
}

fn strip_quoting(reference: &str) -> &str {
    let trimmed = reference.trim();
    if trimmed.len() >= 2 {
        let bytes = trimmed.as_bytes();
        if (bytes[0] == b'"' && bytes[trimmed.len() - 1] == b'"')
            || (bytes[0] == b'[' && bytes[trimmed.len() - 1] == b']')
        {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}
