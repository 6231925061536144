//! Community question board with tri-state voting.
//!
//! Self-contained: nothing here reads preferences or talks to the backend.

use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::constants::{ANSWER_AUTHORS, JUST_NOW, QUESTION_AUTHORS};
use crate::models::{Answer, Question, VoteDirection, VoteTally};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommunityError {
    #[error("Question not found: {0}")]
    QuestionNotFound(String),

    #[error("Answer {answer_id} not found under question {question_id}")]
    AnswerNotFound {
        question_id: String,
        answer_id: String,
    },
}

/// Chooses a display author from a fixed name pool
pub trait AuthorPicker {
    fn pick(&mut self, pool: &[&str]) -> String;
}

/// Uniform choice from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAuthorPicker;

impl AuthorPicker for RandomAuthorPicker {
    fn pick(&mut self, pool: &[&str]) -> String {
        pool.choose(&mut rand::thread_rng())
            .map(|name| name.to_string())
            .unwrap_or_default()
    }
}

impl<F> AuthorPicker for F
where
    F: FnMut(&[&str]) -> String,
{
    fn pick(&mut self, pool: &[&str]) -> String {
        self(pool)
    }
}

pub struct CommunityBoard {
    questions: Vec<Question>,
    authors: Box<dyn AuthorPicker>,
}

impl std::fmt::Debug for CommunityBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommunityBoard")
            .field("questions", &self.questions)
            .finish_non_exhaustive()
    }
}

impl CommunityBoard {
    pub fn new() -> Self {
        Self::with_author_picker(RandomAuthorPicker)
    }

    pub fn with_author_picker(authors: impl AuthorPicker + 'static) -> Self {
        Self {
            questions: Vec::new(),
            authors: Box::new(authors),
        }
    }

    /// A board holding the starter questions every new session sees
    pub fn with_seed_questions() -> Self {
        let mut board = Self::new();
        board.questions = seed_questions();
        board
    }

    /// Newest first
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Post a question at the top of the board. Blank text is ignored.
    pub fn post_question(&mut self, text: &str) -> Option<&Question> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let question = Question {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            author: self.authors.pick(QUESTION_AUTHORS),
            timestamp: JUST_NOW.to_string(),
            votes: VoteTally::default(),
            answers: Vec::new(),
        };
        debug!(question_id = %question.id, "Question posted");
        self.questions.insert(0, question);
        self.questions.first()
    }

    /// Append an answer to a question. Blank text is ignored (Ok(None)).
    pub fn post_answer(&mut self, question_id: &str, text: &str) -> Result<Option<&Answer>, CommunityError> {
        let index = self.question_index(question_id)?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let answer = Answer {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            author: self.authors.pick(ANSWER_AUTHORS),
            timestamp: JUST_NOW.to_string(),
            votes: VoteTally::default(),
        };
        debug!(question_id, answer_id = %answer.id, "Answer posted");
        let answers = &mut self.questions[index].answers;
        answers.push(answer);
        Ok(answers.last())
    }

    pub fn vote_question(
        &mut self,
        question_id: &str,
        direction: VoteDirection,
    ) -> Result<VoteTally, CommunityError> {
        let index = self.question_index(question_id)?;
        let votes = &mut self.questions[index].votes;
        votes.cast(direction);
        Ok(*votes)
    }

    pub fn vote_answer(
        &mut self,
        question_id: &str,
        answer_id: &str,
        direction: VoteDirection,
    ) -> Result<VoteTally, CommunityError> {
        let index = self.question_index(question_id)?;
        let answer = self.questions[index]
            .answers
            .iter_mut()
            .find(|a| a.id == answer_id)
            .ok_or_else(|| CommunityError::AnswerNotFound {
                question_id: question_id.to_string(),
                answer_id: answer_id.to_string(),
            })?;
        answer.votes.cast(direction);
        Ok(answer.votes)
    }

    fn question_index(&self, question_id: &str) -> Result<usize, CommunityError> {
        self.questions
            .iter()
            .position(|q| q.id == question_id)
            .ok_or_else(|| CommunityError::QuestionNotFound(question_id.to_string()))
    }
}

impl Default for CommunityBoard {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_questions() -> Vec<Question> {
    let seed = |id: &str, text: &str, author: &str, answer_text: &str, answer_author: &str| Question {
        id: id.to_string(),
        text: text.to_string(),
        author: author.to_string(),
        timestamp: String::new(),
        votes: VoteTally::default(),
        answers: vec![Answer {
            id: format!("{}-1", id),
            text: answer_text.to_string(),
            author: answer_author.to_string(),
            timestamp: String::new(),
            votes: VoteTally::default(),
        }],
    };

    vec![
        seed(
            "1",
            "What are the best resources for finding internships in the US?",
            "Student123",
            "You can check websites like LinkedIn, Glassdoor, and Indeed. Also, your university's career center might have exclusive opportunities.",
            "Ram Kaji",
        ),
        seed(
            "2",
            "How do I apply for OPT as an international student?",
            "IntlStudent",
            "You need to contact your university's international office. They will guide you through the process, including filling out Form I-765.",
            "Hari Mishra",
        ),
        seed(
            "3",
            "What are the best ways to improve my English speaking skills?",
            "OM",
            "Join English conversation clubs, watch movies with subtitles, and practice speaking with friends or language partners.",
            "Prakash",
        ),
    ]
}
