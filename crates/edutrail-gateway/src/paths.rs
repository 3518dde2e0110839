//! REST paths of the hierarchy endpoints, relative to the API base URL.

use edutrail_models::{ChapterId, ClassId, Section, SubjectId, TopicId};

pub fn classes(section: Option<Section>) -> String {
    match section {
        Some(section) => format!("/classes/?section={}", section.as_str()),
        None => "/classes/".to_string(),
    }
}

pub fn subjects(class: ClassId) -> String {
    format!("/classes/{}/subjects/", class)
}

pub fn chapters(class: ClassId, subject: SubjectId) -> String {
    format!("/classes/{}/subjects/{}/chapters/", class, subject)
}

pub fn chapter(class: ClassId, subject: SubjectId, chapter: ChapterId) -> String {
    format!("/classes/{}/subjects/{}/chapters/{}/", class, subject, chapter)
}

pub fn topics(class: ClassId, subject: SubjectId, chapter: ChapterId) -> String {
    format!(
        "/classes/{}/subjects/{}/chapters/{}/topics/",
        class, subject, chapter
    )
}

pub fn topic(class: ClassId, subject: SubjectId, chapter: ChapterId, topic: TopicId) -> String {
    format!(
        "/classes/{}/subjects/{}/chapters/{}/topics/{}/",
        class, subject, chapter, topic
    )
}

pub fn resources(class: ClassId, subject: SubjectId, chapter: ChapterId, topic: TopicId) -> String {
    format!(
        "/classes/{}/subjects/{}/chapters/{}/topics/{}/resources/",
        class, subject, chapter, topic
    )
}

pub fn class_resources(class: ClassId) -> String {
    format!("/classes/{}/resources/", class)
}

pub fn class_video_resources(class: ClassId) -> String {
    format!("/classes/{}/video-resources/", class)
}
