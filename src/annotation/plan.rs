use crate::domain::traits::ChatSink;
use crate::domain::VideoRecord;

/// Fill the record's lesson-plan template from its form fields.
pub fn generate_plan(record: &VideoRecord) -> String {
    let keywords = record.keywords.as_deref().unwrap_or(&[]).join(",");
    record
        .template
        .replace("${stage}", &record.stage)
        .replace("${grade}", &record.grade)
        .replace("${subject}", &record.subject)
        .replace("${topic}", &record.topic)
        .replace("${keywords}", &keywords)
}

/// Send the generated plan to the assistant as a hidden prompt.
pub fn send_plan(record: &VideoRecord, chat: &dyn ChatSink) -> String {
    let text = generate_plan(record);
    tracing::info!(len = text.len(), "sending lesson plan prompt");
    chat.send_message(&text, true);
    text
}
