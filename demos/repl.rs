use atomscript::{AtomError, EvaluationContext};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt};

async fn query(stdout: &mut io::Stdout, lines: &mut io::Lines<io::BufReader<io::Stdin>>) -> io::Result<Option<String>> {
    stdout.write_all(b">> ").await?;
    stdout.flush().await?;
    lines.next_line().await
}

#[tokio::main]
async fn main() -> io::Result<()> {
    // One context for the whole session, so bindings carry over between lines
    let mut context = EvaluationContext::new();
    let mut lines = io::BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    while let Some(line) = query(&mut stdout, &mut lines).await? {
        match context.evaluate_lines(&line) {
            Ok(results) => results.iter().for_each(|result| println!("{}", result)),
            Err(AtomError::Syntax(errors)) => errors.iter().for_each(|error| println!("{}", error)),
            Err(error) => println!("{}", error),
        }
    }

    Ok(())
}
