// Skill matching and the plain-text artifacts built from its result.
// Matching is plain substring containment: "java" is found inside "javascript".

pub mod matcher;
pub mod report;
