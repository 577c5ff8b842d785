//! Interview question bank

/// Maximum number of questions in a bank
pub const MAX_QUESTIONS: usize = 10;

const SKILL_QUESTIONS: [(&str, &str); 13] = [
    ("SQL", "Explain indexing and how it helps in optimizing queries."),
    ("React", "Explain state management options in React and their trade-offs."),
    ("DSA", "How would you optimize search in sorted versus unsorted data?"),
    ("Java", "Explain the difference between final, finally, and finalize."),
    ("Python", "How are lists and tuples different in terms of memory?"),
    ("Node.js", "How does the event loop work in Node.js?"),
    ("Networks", "Explain the 7 layers of the OSI model and where HTTP resides."),
    ("DBMS", "What are ACID properties and why are they important?"),
    ("OS", "Explain the difference between a process and a thread."),
    ("Docker", "What is the difference between an image and a container?"),
    ("REST", "What are the common HTTP status codes and their meanings?"),
    ("Next.js", "What is the difference between SSR and SSG?"),
    ("MongoDB", "What are the advantages of NoSQL over traditional SQL databases?"),
];

const DEFAULT_QUESTIONS: [&str; 5] = [
    "Tell me about a challenging project you've worked on.",
    "How do you handle disagreements in a team setting?",
    "What is your approach to learning a new technology rapidly?",
    "Explain the Time and Space complexity of your most used algorithm.",
    "How do you ensure code quality in your projects?",
];

/// Question asked for a specific skill, if the bank has one
pub fn question_for(skill: &str) -> Option<&'static str> {
    SKILL_QUESTIONS
        .iter()
        .find(|(s, _)| *s == skill)
        .map(|(_, q)| *q)
}

/// Build the question bank for a list of skills
///
/// Skill questions come first in skill order. Default questions only top the
/// list up while it holds fewer than ten entries.
pub fn generate_questions<'a>(skills: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut questions: Vec<String> = Vec::new();

    for skill in skills {
        if let Some(q) = question_for(skill) {
            if !questions.iter().any(|existing| existing == q) {
                questions.push(q.to_string());
            }
        }
    }

    let mut defaults = DEFAULT_QUESTIONS.iter();
    while questions.len() < MAX_QUESTIONS {
        let Some(q) = defaults.next() else { break };
        if !questions.iter().any(|existing| existing == q) {
            questions.push(q.to_string());
        }
    }

    questions.truncate(MAX_QUESTIONS);
    questions
}
