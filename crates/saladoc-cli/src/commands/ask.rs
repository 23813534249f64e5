//! Ask command implementation.

use crate::cli::AskArgs;
use crate::error::Result;
use crate::output::Formatter;
use saladoc_domain::traits::ModelGateway;
use saladoc_domain::DocumentRecord;
use saladoc_llm::cancellation;
use saladoc_query::{Answer, QueryAnswerer};

/// Execute the ask command.
pub async fn execute_ask<G>(
    args: AskArgs,
    corpus: &[DocumentRecord],
    answerer: &QueryAnswerer<G>,
    formatter: &Formatter,
) -> Result<()>
where
    G: ModelGateway + 'static,
{
    let answer = ask_interruptible(&args.question_text(), corpus, answerer).await;
    println!("{}", formatter.format_answer(&answer)?);
    Ok(())
}

/// Answer a question, cancelling the model call on Ctrl-C.
pub async fn ask_interruptible<G>(
    question: &str,
    corpus: &[DocumentRecord],
    answerer: &QueryAnswerer<G>,
) -> Answer
where
    G: ModelGateway + 'static,
{
    let (handle, signal) = cancellation();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    let answer = answerer.respond_with_cancel(question, corpus, &signal).await;
    watcher.abort();
    answer
}

#[cfg(test)]
mod tests {
    use super::*;
    use saladoc_domain::{DocStatus, DocType, DocumentId};
    use saladoc_llm::MockGateway;
    use saladoc_query::{AnswerOutcome, QueryConfig};

    #[tokio::test]
    async fn test_ask_interruptible_answers() {
        let gateway = MockGateway::new().with_text("April 14 to 18");
        let answerer = QueryAnswerer::new(gateway.clone(), QueryConfig::default());
        let corpus = vec![DocumentRecord {
            id: DocumentId::new("1"),
            reference_number: "MOF-2024-001".to_string(),
            title: "Holiday notice".to_string(),
            doc_type: DocType::Internal,
            origin_dept: "Ministry of Finance".to_string(),
            date: "2024-04-01".to_string(),
            status: DocStatus::Approved,
            summary: "Closed April 14-18".to_string(),
            file_name: None,
        }];

        let answer = ask_interruptible("When is the holiday?", &corpus, &answerer).await;
        assert_eq!(answer.outcome, AnswerOutcome::Answered);
        assert_eq!(answer.text, "April 14 to 18");
        assert!(gateway.last_request().unwrap().prompt.contains("When is the holiday?"));
    }

    #[tokio::test]
    async fn test_execute_ask_on_empty_corpus() {
        let gateway = MockGateway::new();
        let answerer = QueryAnswerer::new(gateway.clone(), QueryConfig::default());
        let formatter = Formatter::new(crate::config::OutputFormat::Quiet, false);
        let args = AskArgs {
            question: vec!["anything?".to_string()],
        };

        execute_ask(args, &[], &answerer, &formatter).await.unwrap();
        assert_eq!(gateway.call_count(), 0);
    }
}
