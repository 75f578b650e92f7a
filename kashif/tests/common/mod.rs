#![allow(dead_code)]

use kashif::config::Config;
use serde_json::Value;
use serde_json::json;
use solana_pubkey::Pubkey;
use wiremock::Match;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::Request;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

pub const DEPLOYER: &str = "Deployer111";
pub const DEPLOY_SIGNATURE: &str = "deploysig";
pub const EXPORT_PATH: &str = "/transfer/export_token";

const EXPORT_HEADER: &str = "type,slot,blockTimeUnix,blockTime,fee,isInner,txHash,sourceOwnerAccount,sourceTokenAccount,destOwnerAccount,destTokenAccount,amount,symbol,decimals,tokenAddress";

pub fn token_address() -> String {
    Pubkey::new_unique().to_string()
}

/// Config pointing every upstream at the mock server
pub fn test_config(
    server: &MockServer,
    stagnation_ceiling: usize,
) -> Config {
    let mut config = Config::default();
    config.rpc.url = server.uri();
    config.solscan.export_url = format!("{}{}", server.uri(), EXPORT_PATH);
    config.helius.api_url = server.uri();
    config.helius.api_key = "test-key".to_string();
    config.scanner.stagnation_ceiling = stagnation_ceiling;
    config.scanner.http_timeout_ms = 2_000;
    config.logging.file_output = false;
    config
}

pub fn mint_export(
    token: &str,
    slot: u64,
) -> String {
    format!(
        "{}\nmint,{},1700000000,2023-11-14 22:13:20,5000,false,{},{},DeployerAta111,Dest111,DestAta111,1000000000,TKN,6,{}\n",
        EXPORT_HEADER, slot, DEPLOY_SIGNATURE, DEPLOYER, token
    )
}

pub fn empty_export() -> String {
    format!("{}\n", EXPORT_HEADER)
}

pub async fn mount_mint_export(
    server: &MockServer,
    token: &str,
    body: String,
) {
    Mock::given(method("GET"))
        .and(path(EXPORT_PATH))
        .and(query_param("token_address", token))
        .and(query_param("type", "mint"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

pub async fn mount_failing_export(
    server: &MockServer,
    token: &str,
) {
    Mock::given(method("GET"))
        .and(path(EXPORT_PATH))
        .and(query_param("token_address", token))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

/// Deployer history holding one entry per `(type, slot)`
pub async fn mount_deployer_history(
    server: &MockServer,
    entries: &[(&str, u64)],
) {
    let history: Vec<Value> = entries
        .iter()
        .map(|(kind, slot)| {
            json!({
                "description": "",
                "type": kind,
                "source": "RAYDIUM",
                "fee": 5000,
                "feePayer": DEPLOYER,
                "signature": format!("history-{}", slot),
                "slot": slot,
                "timestamp": 1_700_000_000,
                "transactionError": null
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/addresses/{}/transactions", DEPLOYER)))
        .and(query_param("source", "RAYDIUM"))
        .and(query_param("until", DEPLOY_SIGNATURE))
        .and(query_param("api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history))
        .mount(server)
        .await;
}

/// Matches a JSON-RPC `getBlock` request for one slot
pub struct BlockSlot(pub u64);

impl Match for BlockSlot {
    fn matches(
        &self,
        request: &Request,
    ) -> bool {
        serde_json::from_slice::<Value>(&request.body)
            .is_ok_and(|body| body["method"] == "getBlock" && body["params"][0] == self.0)
    }
}

/// Matches any JSON-RPC call to `method`
pub struct RpcMethod(pub &'static str);

impl Match for RpcMethod {
    fn matches(
        &self,
        request: &Request,
    ) -> bool {
        serde_json::from_slice::<Value>(&request.body).is_ok_and(|body| body["method"] == self.0)
    }
}

pub fn block_result(
    token: &str,
    slot: u64,
    buyers: &[&str],
) -> Value {
    let transactions: Vec<Value> = buyers
        .iter()
        .map(|buyer| {
            json!({
                "meta": null,
                "transaction": {
                    "accountKeys": [
                        { "pubkey": buyer, "signer": true, "writable": true, "source": "transaction" },
                        { "pubkey": "Pool111", "signer": false, "writable": true, "source": "transaction" },
                        { "pubkey": token, "signer": false, "writable": false, "source": "transaction" }
                    ],
                    "signatures": [format!("sig-{}-{}", slot, buyer)]
                }
            })
        })
        .collect();

    json!({
        "blockhash": format!("hash-{}", slot),
        "previousBlockhash": format!("hash-{}", slot.saturating_sub(1)),
        "parentSlot": slot.saturating_sub(1),
        "blockTime": 1_700_000_000,
        "blockHeight": slot,
        "transactions": transactions
    })
}

fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "jsonrpc": "2.0", "result": result, "id": 1 }))
}

fn rpc_error(
    code: i64,
    message: String,
) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(json!({ "jsonrpc": "2.0", "error": { "code": code, "message": message }, "id": 1 }))
}

pub fn skipped_slot(slot: u64) -> ResponseTemplate {
    rpc_error(-32007, format!("Slot {} was skipped, or missing due to ledger jump to recent snapshot", slot))
}

/// Node version lookups some client versions make before `getBlock`
pub async fn mount_rpc_version(server: &MockServer) {
    Mock::given(method("POST"))
        .and(RpcMethod("getVersion"))
        .respond_with(rpc_result(json!({ "solana-core": "2.1.16", "feature-set": 1 })))
        .mount(server)
        .await;
}

pub async fn mount_block(
    server: &MockServer,
    token: &str,
    slot: u64,
    buyers: &[&str],
) {
    Mock::given(method("POST"))
        .and(BlockSlot(slot))
        .respond_with(rpc_result(block_result(token, slot, buyers)))
        .mount(server)
        .await;
}

/// One block carrying a buy of `token` by `buyer` for each pair
pub async fn mount_block_for_tokens(
    server: &MockServer,
    slot: u64,
    buys: &[(&str, &str)],
) {
    let mut result = block_result("", slot, &[]);
    result["transactions"] = buys
        .iter()
        .flat_map(|(token, buyer)| {
            block_result(token, slot, &[*buyer])["transactions"].as_array().cloned().unwrap_or_default()
        })
        .collect();

    Mock::given(method("POST"))
        .and(BlockSlot(slot))
        .respond_with(rpc_result(result))
        .mount(server)
        .await;
}

pub async fn mount_skipped_block(
    server: &MockServer,
    slot: u64,
) {
    Mock::given(method("POST"))
        .and(BlockSlot(slot))
        .respond_with(skipped_slot(slot))
        .mount(server)
        .await;
}

pub async fn mount_failing_block(
    server: &MockServer,
    slot: u64,
) {
    Mock::given(method("POST"))
        .and(BlockSlot(slot))
        .respond_with(rpc_error(-32602, "Invalid params: slot out of range".to_string()))
        .mount(server)
        .await;
}

/// Every slot without its own mock reads as skipped
pub async fn mount_skipped_fallback(server: &MockServer) {
    Mock::given(method("POST"))
        .and(RpcMethod("getBlock"))
        .respond_with(rpc_error(-32007, "Slot was skipped, or missing in long-term storage".to_string()))
        .with_priority(10)
        .mount(server)
        .await;
}

/// Slots requested through `getBlock`, in request order
pub async fn requested_slots(server: &MockServer) -> Vec<u64> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|request| serde_json::from_slice::<Value>(&request.body).ok())
        .filter(|body| body["method"] == "getBlock")
        .filter_map(|body| body["params"][0].as_u64())
        .collect()
}
