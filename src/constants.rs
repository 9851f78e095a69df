// Fixed values: model routing, endpoint default, prompts.

/// Default completions endpoint base; override with COUNSEL_API_BASE.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com";

/// Model used when buffered attachment text rides along with the request.
pub const FILE_AWARE_MODEL: &str = "gpt-4o-mini";
pub const FILE_AWARE_TEMPERATURE: f32 = 0.7;

/// Model used for plain conversational turns.
pub const REASONING_MODEL: &str = "o1-preview";
pub const REASONING_TEMPERATURE: f32 = 1.0;

/// Surfaced when the endpoint rejects a request without a usable error body.
pub const API_ERROR_FALLBACK: &str = "Unable to process your request.";

/// Preamble sent as the leading message of every request. Tagged with the
/// user role: the reasoning models this client targets reject system-role
/// content.
pub const INSTRUCTION: &str = "You are an AI legal research assistant for practicing lawyers \
working under Indian law. Your responsibilities: answer research questions with accurate, \
current references to statutes, case law and precedent; help draft contracts, briefs, memos \
and motions in proper legal form and terminology; analyse case details and suggest \
preparation strategy; and communicate in the clear, precise register expected between legal \
professionals. When attachment text is supplied with a request, treat it as supplementary \
source material and draw on it alongside your own knowledge. Always cite the relevant \
sections or acts you rely on, including the Constitution, IPC and BNS where applicable.";

/// Shown while the transcript is empty; insertable with Alt+1..Alt+4.
pub const STARTER_PROMPTS: [&str; 4] = [
    "What are the key elements of a valid contract?",
    "Explain the remedies available for breach of contract.",
    "What is the process for filing a civil suit?",
    "Help me draft a non-disclosure agreement (NDA).",
];
