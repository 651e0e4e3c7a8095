//! Interactive chat command handler.

use super::studio::Studio;
use futures_util::StreamExt;
use storyboard::{APOLOGY, IoError, StoryboardResult};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Words that end the conversation.
const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// Reads lines from stdin and streams each reply to stdout.
///
/// Ends on EOF or an exit word.
pub async fn chat_command(studio: &Studio) -> StoryboardResult<()> {
    let chat = studio.chat();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    for message in chat.messages() {
        write(&mut stdout, &format!("{}: {}\n", message.role(), message.text())).await?;
    }

    loop {
        write(&mut stdout, "> ").await?;
        let Some(line) = lines.next_line().await.map_err(|e| IoError::new(e.to_string()))? else {
            break;
        };

        let line = line.trim();
        if EXIT_WORDS.contains(&line) {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let mut turn = chat.send_turn(line)?;
        let mut streamed = false;
        while let Some(fragment) = turn.next().await {
            streamed = true;
            write(&mut stdout, &fragment).await?;
        }

        let failed = chat
            .message(turn.reply_id())
            .is_some_and(|reply| reply.text() == APOLOGY);
        if failed {
            if streamed {
                write(&mut stdout, "\n").await?;
            }
            write(&mut stdout, APOLOGY).await?;
        }
        write(&mut stdout, "\n").await?;
    }

    Ok(())
}

async fn write(stdout: &mut tokio::io::Stdout, text: &str) -> StoryboardResult<()> {
    stdout
        .write_all(text.as_bytes())
        .await
        .map_err(|e| IoError::new(e.to_string()))?;
    stdout
        .flush()
        .await
        .map_err(|e| IoError::new(e.to_string()))?;
    Ok(())
}
