//! Prompt templates for the summarization and Q&A endpoints.
//!
//! These are rendered server-side so that prompt wording stays consistent
//! across clients and can be revised without a client release.

pub fn summarize_prompt(document_text: &str) -> String {
    format!(
        "You are a legal assistant specializing in document analysis. \n\
Summarize the following legal document into clear, actionable bullet points. \n\
Focus on:\n\
- Key obligations and responsibilities for each party\n\
- Important rights and protections\n\
- Potential risks and liabilities\n\
- Critical deadlines or time-sensitive clauses\n\
- Financial terms and payment obligations\n\
- Termination conditions\n\
\n\
Format your response with clear bullet points and section headers where appropriate.\n\
\n\
Document:\n\
{document_text}"
    )
}

pub fn ask_prompt(document_text: &str, question: &str) -> String {
    format!(
        "You are a helpful legal assistant with expertise in contract and legal document analysis.\n\
\n\
Based ONLY on the document provided below, answer the user's question clearly and accurately.\n\
\n\
Guidelines:\n\
- If the answer is directly stated in the document, provide the relevant information with specific references\n\
- If the answer requires interpretation of legal language, explain it in plain English\n\
- If the information is not present in the document, clearly state that you cannot find it\n\
- Cite specific sections or clauses when possible\n\
- If the question involves legal advice, remind the user to consult with a qualified attorney\n\
\n\
Document:\n\
{document_text}\n\
\n\
User Question: {question}\n\
\n\
Answer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_prompt_embeds_document_verbatim() {
        let document = "Section 1. Rent is $1000/month due on the 1st.";
        let prompt = summarize_prompt(document);
        assert!(prompt.starts_with("You are a legal assistant"));
        assert!(prompt.ends_with(&format!("Document:\n{document}")));
        assert!(prompt.contains("- Termination conditions\n"));
    }

    #[test]
    fn test_ask_prompt_embeds_document_and_question() {
        let document = "Section 1. Rent is $1000/month due on the 1st.";
        let question = "How much is the rent?";
        let prompt = ask_prompt(document, question);
        assert!(prompt.contains(&format!("Document:\n{document}\n")));
        assert!(prompt.contains(&format!("User Question: {question}\n")));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn test_ask_prompt_guidelines() {
        let prompt = ask_prompt("doc", "q");
        assert!(prompt.contains("Based ONLY on the document provided below"));
        assert!(prompt.contains("consult with a qualified attorney"));
    }
}
