use anyhow::Result;
use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram,
};
use std::time::Duration;

/// Names of every metric the application emits, recorded through the
/// global recorder.
#[derive(Clone, Copy)]
pub struct MetricsCollector {
    // Store metrics
    pub store_operations_total: &'static str,
    pub store_operation_duration: &'static str,
    pub collection_size: &'static str,

    // Data lifecycle metrics
    pub records_seeded_total: &'static str,
    pub records_imported_total: &'static str,
    pub records_exported_total: &'static str,

    // Usage metrics
    pub views_rendered_total: &'static str,
    pub searches_total: &'static str,
    pub reports_written_total: &'static str,
    pub export_file_size_bytes: &'static str,

    // Error metrics
    pub errors_total: &'static str,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            store_operations_total: "payment_tracker_store_operations_total",
            store_operation_duration: "payment_tracker_store_operation_duration_seconds",
            collection_size: "payment_tracker_collection_size",

            records_seeded_total: "payment_tracker_records_seeded_total",
            records_imported_total: "payment_tracker_records_imported_total",
            records_exported_total: "payment_tracker_records_exported_total",

            views_rendered_total: "payment_tracker_views_rendered_total",
            searches_total: "payment_tracker_searches_total",
            reports_written_total: "payment_tracker_reports_written_total",
            export_file_size_bytes: "payment_tracker_export_file_size_bytes",

            errors_total: "payment_tracker_errors_total",
        }
    }
}

impl MetricsCollector {
    /// Register metric descriptions with the global recorder
    pub fn init() -> Result<()> {
        let collector = Self::default();

        describe_counter!(
            collector.store_operations_total,
            "Store operations by kind and status"
        );
        describe_histogram!(
            collector.store_operation_duration,
            "Store operation latency in seconds"
        );
        describe_gauge!(
            collector.collection_size,
            "Records currently held per collection"
        );
        describe_counter!(
            collector.records_seeded_total,
            "Records loaded from the bundled seed files"
        );
        describe_counter!(
            collector.records_imported_total,
            "Records replaced by backup imports"
        );
        describe_counter!(
            collector.records_exported_total,
            "Records written into backups"
        );
        describe_counter!(collector.views_rendered_total, "View frames built, by view");
        describe_counter!(collector.searches_total, "Searches run, by collection");
        describe_counter!(
            collector.reports_written_total,
            "Report files written, by format"
        );
        describe_histogram!(
            collector.export_file_size_bytes,
            "Size of written backup files in bytes"
        );
        describe_counter!(collector.errors_total, "Errors by type and operation");

        Ok(())
    }

    /// Record store operation metrics
    pub fn record_store_operation(&self, operation: &str, duration: Duration, success: bool) {
        let status = if success { "success" } else { "error" };

        counter!(
            self.store_operations_total,
            "operation" => operation.to_string(),
            "status" => status
        )
        .increment(1);
        histogram!(
            self.store_operation_duration,
            "operation" => operation.to_string()
        )
        .record(duration.as_secs_f64());

        if !success {
            counter!(self.errors_total, "type" => "store", "operation" => operation.to_string())
                .increment(1);
        }
    }

    /// Record how many records a collection currently holds
    pub fn set_collection_size(&self, collection: &str, size: usize) {
        gauge!(self.collection_size, "collection" => collection.to_string()).set(size as f64);
    }

    /// Record seed loading metrics
    pub fn record_seed(&self, collection: &str, count: usize) {
        counter!(self.records_seeded_total, "collection" => collection.to_string())
            .increment(count as u64);
    }

    /// Record backup import metrics
    pub fn record_import(&self, collection: &str, count: usize) {
        counter!(self.records_imported_total, "collection" => collection.to_string())
            .increment(count as u64);
    }

    /// Record backup export metrics
    pub fn record_export(&self, collection: &str, count: usize) {
        counter!(self.records_exported_total, "collection" => collection.to_string())
            .increment(count as u64);
    }

    /// Record the size of a written backup file
    pub fn record_export_file_size(&self, size_bytes: u64) {
        histogram!(self.export_file_size_bytes).record(size_bytes as f64);
    }

    /// Record a rendered view
    pub fn record_view_render(&self, view: &str) {
        counter!(self.views_rendered_total, "view" => view.to_string()).increment(1);
    }

    /// Record a search
    pub fn record_search(&self, collection: &str) {
        counter!(self.searches_total, "collection" => collection.to_string()).increment(1);
    }

    /// Record a written report file
    pub fn record_report(&self, format: &str) {
        counter!(self.reports_written_total, "format" => format.to_string()).increment(1);
    }

    /// Record an error by type and operation
    pub fn record_error(&self, error_type: &str, operation: &str) {
        counter!(
            self.errors_total,
            "type" => error_type.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }
}

/// Times an operation and records it as a store operation on finish.
pub struct MetricsTimer {
    collector: MetricsCollector,
    operation: String,
    start: std::time::Instant,
}

impl MetricsTimer {
    pub fn new(collector: MetricsCollector, operation: &str) -> Self {
        Self {
            collector,
            operation: operation.to_string(),
            start: std::time::Instant::now(),
        }
    }

    pub fn finish(self, success: bool) {
        let duration = self.start.elapsed();
        self.collector
            .record_store_operation(&self.operation, duration, success);
    }
}

/// Shorthand for recording a store operation outcome.
#[macro_export]
macro_rules! record_store_operation {
    ($collector:expr, $operation:expr, $duration:expr, $success:expr) => {
        $collector.record_store_operation($operation, $duration, $success);
    };
}

/// Shorthand for recording an error by type and operation.
#[macro_export]
macro_rules! record_error {
    ($collector:expr, $error_type:expr, $operation:expr) => {
        $collector.record_error($error_type, $operation);
    };
}
