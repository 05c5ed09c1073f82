/// Generate a new random ID (UUIDv4, no dashes).
///
/// 122 bits of entropy; callers never consult existing ids.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
