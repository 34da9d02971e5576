const RECORDS_RETRIEVED_METRIC_NAME: &str = "records_retrieved";
const RECORDS_CREATED_METRIC_NAME: &str = "num_records_created";
const RECORDS_UPDATED_METRIC_NAME: &str = "num_records_updated";
const RECORDS_DELETED_METRIC_NAME: &str = "num_records_deleted";
const RECORDS_REORDERED_METRIC_NAME: &str = "num_records_reordered";
const MESSAGES_RECEIVED_METRIC_NAME: &str = "num_messages_received";
const IMAGES_UPLOADED_METRIC_NAME: &str = "num_images_uploaded";
const LOGINS_METRIC_NAME: &str = "num_logins";

#[inline]
pub fn increment_retrieved_by(kind: &'static str, amt: usize) {
    metrics::counter!(RECORDS_RETRIEVED_METRIC_NAME, "kind" => kind).increment(amt as u64);
}

#[inline]
pub fn increment_created(kind: &'static str) {
    metrics::counter!(RECORDS_CREATED_METRIC_NAME, "kind" => kind).increment(1);
}

#[inline]
pub fn increment_updated(kind: &'static str) {
    metrics::counter!(RECORDS_UPDATED_METRIC_NAME, "kind" => kind).increment(1);
}

#[inline]
pub fn increment_deleted(kind: &'static str) {
    metrics::counter!(RECORDS_DELETED_METRIC_NAME, "kind" => kind).increment(1);
}

#[inline]
pub fn increment_reordered_by(kind: &'static str, amt: usize) {
    metrics::counter!(RECORDS_REORDERED_METRIC_NAME, "kind" => kind).increment(amt as u64);
}

#[inline]
pub fn increment_messages_received() {
    metrics::counter!(MESSAGES_RECEIVED_METRIC_NAME).increment(1);
}

#[inline]
pub fn increment_images_uploaded() {
    metrics::counter!(IMAGES_UPLOADED_METRIC_NAME).increment(1);
}

#[inline]
pub fn increment_logins(outcome: &'static str) {
    metrics::counter!(LOGINS_METRIC_NAME, "outcome" => outcome).increment(1);
}
