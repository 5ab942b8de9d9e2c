use serde_json::json;

use crate::api::pairing::{self, PAIRING_INTERVAL};
use crate::cli::output::print_json;
use crate::cli::BridgeArgs;
use crate::error::AppError;

pub async fn handle(bridge: &BridgeArgs, attempts: u32) -> Result<(), AppError> {
    let address = bridge.address()?;
    let device_type = pairing::device_type();

    tracing::info!(bridge = %address, "press the link button on the bridge");
    let username =
        pairing::create_username(&address, &device_type, attempts, PAIRING_INTERVAL).await?;

    print_json(&json!({
        "status": "paired",
        "bridge": address,
        "devicetype": device_type,
        "username": username,
    }));

    Ok(())
}
