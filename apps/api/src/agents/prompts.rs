// LLM prompt templates for the advisory routines.
// Placeholders in `{braces}` are replaced before sending.

/// Progress tip. Free text, not JSON.
pub const PROGRESS_TIP_PROMPT: &str = "\
The candidate is about to attend the {stage} at {company}. \
Write one short (under 30 words) encouraging or strategic reminder for them. \
Reply with the reminder text only, without quotes.";

pub const COACH_ROLE: &str = "\
You are a senior interview coach. Using the company, position and job-description \
keywords the user provides, produce a structured interview preparation plan.";

pub const COACH_SCHEMA: &str = r#"{
  "checklist": ["Review topic X", "Prepare a story about Y"],
  "mock_script": [
    {
      "question": "A question the interviewer is likely to ask",
      "intent": "What the question is probing for",
      "star_guide": "Answer outline (Situation / Task / Action / Result)"
    }
  ]
}"#;

pub const COACH_PROMPT: &str = "\
Target company: {company}
Target position: {position}
JD keywords: {keywords}

Produce:
1. A checklist of 5 concrete preparation items.
2. 3 high-frequency mock interview questions (mock_script), each with its intent and an answer outline.";

pub const REVIEW_ROLE: &str = "\
You are an interview debrief specialist. Based on the candidate's own summary and \
self-score, assess their performance.";

pub const REVIEW_SCHEMA: &str = r#"{
  "skills": {
    "Technical depth": 4,
    "Communication": 3,
    "Structured thinking": 5
  },
  "weakness": "One sentence naming the most important weak spot",
  "actions": ["Concrete improvement action 1", "Concrete improvement action 2"]
}"#;

pub const REVIEW_PROMPT: &str = "\
Self-score: {score}/5
Debrief: {summary}
Noted improvements: {improvement}
Earlier debriefs for this interview: {history}

Infer a 1-5 score for each skill dimension, identify the main weakness and give concrete actions.";

pub const DECISION_ROLE: &str = "\
You are a career planning advisor. Evaluate this job opportunity for the candidate.";

pub const DECISION_SCHEMA: &str = r#"{
  "matrix": {
    "columns": [
      {"title": "Dimension", "dataIndex": "dim"},
      {"title": "Score", "dataIndex": "score"},
      {"title": "Analysis", "dataIndex": "analysis"}
    ],
    "rows": [
      {"dim": "Compensation", "score": "85", "analysis": "Short assessment"},
      {"dim": "Growth", "score": "90", "analysis": "Short assessment"}
    ]
  },
  "recommendation": "Overall recommendation based on what is known (under 100 words)"
}"#;

pub const DECISION_PROMPT: &str = "\
Analyse the strengths and weaknesses of this offer opportunity:
Company: {company}
Position: {position}
Interview debriefs so far: {history}

Build an analysis matrix covering compensation, growth, workload and culture, \
and give a career recommendation.";
