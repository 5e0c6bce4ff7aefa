use crate::error::{Result, AppError};
use crate::scrape::CLIENT;

/// Relays the chat reply to the speaker device without touching the response
/// path: the task is detached and its outcome only ever reaches the log.
/// Returns whether a relay was actually dispatched, which is `false` whenever
/// no device address is configured.
pub fn speak_if_configured(esp32_addr: Option<&str>, reply: &str) -> bool {
    let Some(addr) = esp32_addr else {
        return false;
    };

    let url = format!("http://{}/say", addr);
    let text = reply.to_string();
    tokio::spawn(async move {
        if let Err(err) = CLIENT.get(&url).query(&[("text", text.as_str())]).send().await {
            eprintln!("Speaker notify failed: {}", err);
        }
    });

    true
}

/// Awaited relay used by the explicit /say route. The device publishes no
/// response contract, so reaching it counts as success.
pub async fn send_to_speaker(addr: &str, text: &str) -> Result<()> {
    CLIENT
        .get(format!("http://{}/say", addr))
        .query(&[("text", text)])
        .send()
        .await
        .map_err(|e| AppError::Notify(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_device_is_a_no_op() {
        // No runtime is running here, so this also proves the absent-address
        // path never spawns a task or touches the network.
        assert!(!speak_if_configured(None, "hello"));
    }
}
