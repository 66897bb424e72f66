//! CSV export of rollups for user-facing downloads.

use chrono::Duration;

use crate::{Bucket, Rollup};

const LINE_END: &str = "\r\n";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvOptions {
    pub include_diversion_rate: bool,
}

/// Renders one row per bucket under a `Date,Recycle,Compost,Trash,Total`
/// header, optionally followed by a `Diversion Rate` column.
pub fn rollup_to_csv(rollup: &Rollup, options: CsvOptions) -> String {
    let mut output = String::new();
    output.push_str(&header(options));
    output.push_str(LINE_END);
    for bucket in &rollup.buckets {
        output.push_str(&format_bucket(bucket, options));
        output.push_str(LINE_END);
    }
    output
}

fn header(options: CsvOptions) -> String {
    let mut headers = vec!["Date", "Recycle", "Compost", "Trash", "Total"];
    if options.include_diversion_rate {
        headers.push("Diversion Rate");
    }
    headers
        .into_iter()
        .map(escape_field)
        .collect::<Vec<_>>()
        .join(",")
}

fn format_bucket(bucket: &Bucket, options: CsvOptions) -> String {
    let totals = &bucket.totals;
    let mut fields = vec![
        escape_field(&bucket_date(bucket)),
        totals.recycle.to_string(),
        totals.compost.to_string(),
        totals.trash.to_string(),
        totals.total.to_string(),
    ];
    if options.include_diversion_rate {
        fields.push(format!("{:.1}%", totals.diversion_rate()));
    }
    fields.join(",")
}

/// Axis labels are thinned for charts, so exports use the bucket start instead.
fn bucket_date(bucket: &Bucket) -> String {
    if bucket.end - bucket.start < Duration::hours(1) {
        bucket.start.format("%Y-%m-%d %H:%M").to_string()
    } else {
        bucket.start.format("%Y-%m-%d").to_string()
    }
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
