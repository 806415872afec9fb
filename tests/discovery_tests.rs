use num_bigint::BigUint;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dust_sweeper::{AppConfig, Chain, EtherscanTokenDiscovery, SweepError, TokenDiscovery};

const WALLET: &str = "0x1111111111111111111111111111111111111111";

fn test_config(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.etherscan_api_key = "test-key".to_string();
    config.v2_api_url = format!("{}/api/v2", server.uri());
    config.v1_api_urls.insert(1, server.uri());
    config.v1_api_urls.insert(8453, server.uri());
    config
}

fn v2_path() -> String {
    format!("/api/v2/accounts/{}/tokens", WALLET)
}

async fn mount_failing_v2(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(v2_path()))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

#[tokio::test]
async fn canonical_items_response_maps_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(v2_path()))
        .and(query_param("chainid", "1"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "token": {
                    "address": "0xAAA",
                    "decimals": "6",
                    "symbol": "T",
                    "name": "Test Token",
                    "type": "ERC-20",
                    "exchange_rate": "2.5"
                },
                "token_id": null,
                "token_instance": null,
                "value": "1500000"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let discovery = EtherscanTokenDiscovery::new(test_config(&server));
    let tokens = discovery
        .discover_tokens(WALLET, &Chain::ethereum())
        .await
        .unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].address, "0xAAA");
    assert_eq!(tokens[0].symbol, "T");
    assert_eq!(tokens[0].decimals, 6);
    assert_eq!(tokens[0].balance, "1.5000");
    assert_eq!(tokens[0].raw_balance, BigUint::from(1_500_000u32));
    assert_eq!(tokens[0].price, 2.5);
}

#[tokio::test]
async fn alternate_data_response_is_field_mapped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(v2_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "contractAddress": "0xBBB",
                "decimals": 8,
                "price": "0.5",
                "symbol": "ALT",
                "name": "Alt Token",
                "balance": "12345678"
            }, {
                "address": "0xCCC",
                "symbol": "BARE",
                "tokenBalance": "2000000000000000000"
            }]
        })))
        .mount(&server)
        .await;

    let discovery = EtherscanTokenDiscovery::new(test_config(&server));
    let tokens = discovery
        .discover_tokens(WALLET, &Chain::ethereum())
        .await
        .unwrap();

    assert_eq!(tokens.len(), 2);

    assert_eq!(tokens[0].address, "0xBBB");
    assert_eq!(tokens[0].decimals, 8);
    assert_eq!(tokens[0].balance, "0.1235");
    assert_eq!(tokens[0].price, 0.5);

    // Second entry exercises the documented defaults
    assert_eq!(tokens[1].address, "0xCCC");
    assert_eq!(tokens[1].decimals, 18);
    assert_eq!(tokens[1].balance, "2.0000");
    assert_eq!(tokens[1].price, 0.0);
}

#[tokio::test]
async fn falls_back_to_v1_history_when_v2_is_unusable() {
    let server = MockServer::start().await;
    mount_failing_v2(&server).await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "tokentx"))
        .and(query_param("address", WALLET))
        .and(query_param("offset", "10000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1",
            "message": "OK",
            "result": [
                {
                    "contractAddress": "0xAbC1000000000000000000000000000000000001",
                    "tokenDecimal": "6",
                    "tokenSymbol": "ONE",
                    "tokenName": "One Token"
                },
                {
                    "contractAddress": "0xABC1000000000000000000000000000000000001",
                    "tokenDecimal": "8",
                    "tokenSymbol": "DUPE",
                    "tokenName": "Duplicate"
                },
                {
                    "contractAddress": "0xDef2000000000000000000000000000000000002",
                    "tokenDecimal": "18",
                    "tokenSymbol": "TWO",
                    "tokenName": "Two Token"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "tokenbalancemulti"))
        .and(query_param("tag", "latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1",
            "message": "OK",
            "result": ["100", "0"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let discovery = EtherscanTokenDiscovery::new(test_config(&server));
    let tokens = discovery
        .discover_tokens(WALLET, &Chain::ethereum())
        .await
        .unwrap();

    // The duplicate collapses case-insensitively; the zero balance drops out
    assert_eq!(tokens.len(), 1);
    assert_eq!(
        tokens[0].address,
        "0xAbC1000000000000000000000000000000000001"
    );
    assert_eq!(tokens[0].symbol, "ONE");
    assert_eq!(tokens[0].decimals, 6);
    assert_eq!(tokens[0].raw_balance, BigUint::from(100u32));
    assert_eq!(tokens[0].balance, "0.0001");
    assert_eq!(tokens[0].price, 0.0);
    assert_eq!(tokens[0].logo_uri, None);
}

#[tokio::test]
async fn legacy_balances_run_in_batches_of_twenty() {
    let server = MockServer::start().await;
    mount_failing_v2(&server).await;

    let transfers: Vec<serde_json::Value> = (0..45)
        .map(|i| {
            json!({
                "contractAddress": format!("0x{:040x}", i + 1),
                "tokenDecimal": "18",
                "tokenSymbol": format!("T{i}"),
                "tokenName": "Batch Token"
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "tokentx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1",
            "message": "OK",
            "result": transfers
        })))
        .expect(1)
        .mount(&server)
        .await;

    // 45 unique contracts with a 20-address ceiling means exactly 3 calls
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "tokenbalancemulti"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1",
            "message": "OK",
            "result": vec!["1"; 20]
        })))
        .expect(3)
        .mount(&server)
        .await;

    let discovery = EtherscanTokenDiscovery::new(test_config(&server));
    let tokens = discovery
        .discover_tokens(WALLET, &Chain::ethereum())
        .await
        .unwrap();

    assert_eq!(tokens.len(), 45);
    server.verify().await;
}

#[tokio::test]
async fn failed_balance_batch_is_absorbed() {
    let server = MockServer::start().await;
    mount_failing_v2(&server).await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "tokentx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1",
            "message": "OK",
            "result": [{
                "contractAddress": "0xAbC1000000000000000000000000000000000001",
                "tokenDecimal": "6",
                "tokenSymbol": "ONE",
                "tokenName": "One Token"
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "tokenbalancemulti"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Max rate limit reached"
        })))
        .mount(&server)
        .await;

    let discovery = EtherscanTokenDiscovery::new(test_config(&server));
    let tokens = discovery
        .discover_tokens(WALLET, &Chain::ethereum())
        .await
        .unwrap();

    assert!(tokens.is_empty());
}

#[tokio::test]
async fn v1_history_error_status_fails_the_call() {
    let server = MockServer::start().await;
    mount_failing_v2(&server).await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "tokentx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Error! Invalid address format"
        })))
        .mount(&server)
        .await;

    let discovery = EtherscanTokenDiscovery::new(test_config(&server));
    let err = discovery
        .discover_tokens(WALLET, &Chain::ethereum())
        .await
        .unwrap_err();

    match err {
        SweepError::Upstream(message) => assert_eq!(message, "NOTOK"),
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn v1_history_transport_error_fails_the_call() {
    let server = MockServer::start().await;
    mount_failing_v2(&server).await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "tokentx"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let discovery = EtherscanTokenDiscovery::new(test_config(&server));
    let err = discovery
        .discover_tokens(WALLET, &Chain::ethereum())
        .await
        .unwrap_err();

    assert!(matches!(err, SweepError::UpstreamStatus(502)));
}

#[tokio::test]
async fn unsupported_chain_fails_before_any_network_call() {
    let server = MockServer::start().await;

    let discovery = EtherscanTokenDiscovery::new(test_config(&server));
    let polygon = Chain::new(137, "Polygon", "https://polygonscan.com");
    let err = discovery.discover_tokens(WALLET, &polygon).await.unwrap_err();

    assert!(matches!(err, SweepError::UnsupportedChain { id: 137, .. }));
    assert!(err.to_string().contains("137"));
    assert!(err.to_string().contains("Polygon"));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn missing_api_key_fails_before_any_network_call() {
    let server = MockServer::start().await;

    let mut config = test_config(&server);
    config.etherscan_api_key = String::new();

    let discovery = EtherscanTokenDiscovery::new(config);
    let err = discovery
        .discover_tokens(WALLET, &Chain::ethereum())
        .await
        .unwrap_err();

    assert!(matches!(err, SweepError::MissingApiKey));
    assert!(err.to_string().contains("ETHERSCAN_API_KEY"));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn mock_flag_serves_the_static_dataset_without_network() {
    let server = MockServer::start().await;

    let mut config = test_config(&server);
    config.use_mocks = true;

    let discovery = EtherscanTokenDiscovery::new(config);
    let tokens = discovery
        .discover_tokens(WALLET, &Chain::ethereum())
        .await
        .unwrap();

    // The dataset carries an ERC-721 and a zero balance; both filter out
    assert_eq!(tokens.len(), 3);
    let symbols: Vec<&str> = tokens.iter().map(|t| t.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["USDC", "DAI", "SHIB"]);

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn unrecognized_v2_shape_falls_through_to_v1() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(v2_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tokens": [{"address": "0xAAA"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", "tokentx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1",
            "message": "OK",
            "result": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let discovery = EtherscanTokenDiscovery::new(test_config(&server));
    let tokens = discovery
        .discover_tokens(WALLET, &Chain::ethereum())
        .await
        .unwrap();

    assert!(tokens.is_empty());
    server.verify().await;
}
