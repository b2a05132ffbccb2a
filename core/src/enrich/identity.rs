use crate::receiver::TagDetection;

/// Derives the canonical tag identity string,
/// `{code_char}{code_freq}-{code_channel}-{tag_serial_no}`.
///
/// This string is what deduplication, reference-tag exclusion, and display
/// key on; identical field values always produce identical identities.
pub fn format_tag_identity(detection: &TagDetection) -> String {
    format!(
        "{}{}-{}-{}",
        detection.code_char, detection.code_freq, detection.code_channel, detection.tag_serial_no
    )
}
