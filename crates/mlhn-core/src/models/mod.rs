mod dataset;
mod output;
mod processed_record;

pub use dataset::MultiLabelDataset;
pub use output::MultiLabelOutput;
pub use processed_record::ProcessedRecord;

/// One binary indicator per label.
pub type LabelVector = Vec<bool>;
