mod csv_export;

pub(crate) use csv_export::{export_file_name, to_csv};
