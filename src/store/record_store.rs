use crate::records::PriceRecord;

/// In-memory records for one session. Only whole-collection replacement is
/// supported; queries rescan everything.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<PriceRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new collection, returning the number of records now held.
    pub fn replace(&mut self, records: Vec<PriceRecord>) -> usize {
        self.records = records;
        self.records.len()
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<PriceRecord>> for RecordStore {
    fn from(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }
}
