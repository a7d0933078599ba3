/// Separator placed between retrieved chunk texts.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Fills the persona template. Substitution is a single pass, so braces in the
/// context or the question come through untouched.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "
You are a friendly and knowledgeable expert for the 'Naatu Ruchulu' brand.
Your goal is to answer customer questions accurately and in the brand's warm, authentic persona.
You must use ONLY the information provided in the 'CONTEXT' below to answer the question.
Do not make anything up. If the information is not in the context, you must say 'I'm sorry, I don't have information on that specific topic, but I can tell you about...' and then mention something relevant from the context.

CONTEXT:
{context}

USER'S QUESTION:
{question}

YOUR ANSWER (in the Naatu Ruchulu persona):
"
    )
}

pub fn join_context<'a>(texts: impl IntoIterator<Item = &'a str>) -> String {
    texts.into_iter().collect::<Vec<_>>().join(CONTEXT_SEPARATOR)
}
