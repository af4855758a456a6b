use reqwest::{header::USER_AGENT, Client};
use rugcheck_common::{Node, NodeResult};
use serde::Serialize;
use serde_json::{Number, Value};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::ReportError;
use crate::risk::{classify_risk, RiskTier};

/// Truy cập các trường của báo cáo RugCheck mà proxy thực sự đọc
pub trait ReportFields {
    fn token_meta(&self) -> NodeResult<&Node>;
    fn name(&self) -> NodeResult<&Node>;
    fn symbol(&self) -> NodeResult<&Node>;
    fn rugged(&self) -> NodeResult<&Node>;
    fn score(&self) -> NodeResult<&Node>;
    fn mint(&self) -> NodeResult<&Node>;
    fn total_market_liquidity(&self) -> NodeResult<&Node>;
}

impl ReportFields for Node {
    fn token_meta(&self) -> NodeResult<&Node> {
        self.field("tokenMeta")
    }

    fn name(&self) -> NodeResult<&Node> {
        self.field("name")
    }

    fn symbol(&self) -> NodeResult<&Node> {
        self.field("symbol")
    }

    fn rugged(&self) -> NodeResult<&Node> {
        self.field("rugged")
    }

    fn score(&self) -> NodeResult<&Node> {
        self.field("score")
    }

    fn mint(&self) -> NodeResult<&Node> {
        self.field("mint")
    }

    fn total_market_liquidity(&self) -> NodeResult<&Node> {
        self.field("totalMarketLiquidity")
    }
}

/// Bản tóm tắt trả về cho client
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub name: Value,
    pub symbol: Value,
    pub rugged: Value,
    pub result: RiskTier,
    pub risk_score: Number,
    pub mint: Value,
    pub total_market_liquidity: Value,
}

/// Điểm rủi ro dạng số, giữ nguyên biểu diễn của upstream (42 vẫn là 42)
fn risk_score(root: &Node) -> Result<(&Number, f64), ReportError> {
    let score = root.score()?;
    score
        .as_number()
        .and_then(|number| number.as_f64().map(|value| (number, value)))
        .ok_or_else(|| ReportError::UpstreamMalformed(format!("score is not a number: {}", score)))
}

/// Chiếu báo cáo đã bọc thành bản tóm tắt 7 trường. Thiếu bất kỳ trường nào là lỗi.
pub fn build_summary(root: &Node) -> Result<ReportSummary, ReportError> {
    let token_meta = root.token_meta()?;
    let (score, value) = risk_score(root)?;

    Ok(ReportSummary {
        name: token_meta.name()?.to_value(),
        symbol: token_meta.symbol()?.to_value(),
        rugged: root.rugged()?.to_value(),
        result: classify_risk(value),
        risk_score: score.clone(),
        mint: root.mint()?.to_value(),
        total_market_liquidity: root.total_market_liquidity()?.to_value(),
    })
}

/// Báo cáo RugCheck của một token
#[derive(Debug, Clone)]
pub struct RugCheckReport {
    token_address: String,
    data: Node,
}

impl RugCheckReport {
    pub fn new(token_address: impl Into<String>, data: Node) -> Self {
        Self {
            token_address: token_address.into(),
            data,
        }
    }

    pub fn token_address(&self) -> &str {
        &self.token_address
    }

    pub fn data(&self) -> &Node {
        &self.data
    }

    pub fn into_data(self) -> Node {
        self.data
    }

    /// Mức rủi ro theo `score`
    pub fn result(&self) -> Result<RiskTier, ReportError> {
        risk_score(&self.data).map(|(_, value)| classify_risk(value))
    }

    pub fn summary(&self) -> Result<ReportSummary, ReportError> {
        build_summary(&self.data)
    }
}

/// Client gọi RugCheck API
#[derive(Debug, Clone)]
pub struct RugCheckClient {
    http: Client,
    base_url: String,
    user_agent: String,
}

impl RugCheckClient {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.upstream_base_url.clone(), config.user_agent.clone())
    }

    /// URL báo cáo; địa chỉ token được chèn nguyên văn, không kiểm tra
    pub fn report_url(&self, token_address: &str) -> String {
        format!(
            "{}/tokens/{}/report",
            self.base_url.trim_end_matches('/'),
            token_address
        )
    }

    /// Gọi upstream một lần (không retry, không cache) và bọc JSON trả về
    pub async fn fetch_report(&self, token_address: &str) -> Result<RugCheckReport, ReportError> {
        let url = self.report_url(token_address);
        debug!(%url, "Gửi request tới RugCheck");

        let response = self
            .http
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::UpstreamMalformed(format!(
                "upstream returned status {}",
                status
            )));
        }

        let body = response.text().await?;
        let data: Node = serde_json::from_str(&body)?;

        info!(token = %token_address, "Đã nhận báo cáo RugCheck");
        Ok(RugCheckReport::new(token_address, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rugcheck_common::NodeError;
    use serde_json::json;

    fn report(value: Value) -> RugCheckReport {
        RugCheckReport::new("ABC123", Node::wrap(value))
    }

    fn valid_report() -> Value {
        json!({
            "tokenMeta": {"name": "Foo", "symbol": "FOO", "uri": "ipfs://foo"},
            "rugged": false,
            "score": 42,
            "mint": "ABC123",
            "totalMarketLiquidity": 1000.5,
            "risks": [{"name": "Low liquidity", "score": 40}],
        })
    }

    #[test]
    fn test_summary_projection() {
        let summary = report(valid_report()).summary().unwrap();
        let body = serde_json::to_value(&summary).unwrap();

        assert_eq!(
            body,
            json!({
                "name": "Foo",
                "symbol": "FOO",
                "rugged": false,
                "result": "Good",
                "riskScore": 42,
                "mint": "ABC123",
                "totalMarketLiquidity": 1000.5,
            })
        );
    }

    #[test]
    fn test_result_tiers() {
        let mut value = valid_report();
        value["score"] = json!(5000);
        assert_eq!(report(value.clone()).result().unwrap(), RiskTier::Danger);

        value["score"] = json!(1000);
        assert_eq!(report(value.clone()).result().unwrap(), RiskTier::Warning);

        value["score"] = json!(999.5);
        assert_eq!(report(value).result().unwrap(), RiskTier::Good);
    }

    #[test]
    fn test_missing_token_meta() {
        let mut value = valid_report();
        value.as_object_mut().unwrap().remove("tokenMeta");

        let err = report(value).summary().unwrap_err();
        match err {
            ReportError::MissingField(e) => assert_eq!(e, NodeError::missing("tokenMeta")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_every_field_required() {
        for key in ["rugged", "score", "mint", "totalMarketLiquidity"] {
            let mut value = valid_report();
            value.as_object_mut().unwrap().remove(key);
            assert!(
                matches!(build_summary(&Node::wrap(value)), Err(ReportError::MissingField(_))),
                "{key} should be required"
            );
        }

        let mut value = valid_report();
        value["tokenMeta"].as_object_mut().unwrap().remove("symbol");
        let err = build_summary(&Node::wrap(value)).unwrap_err();
        assert_eq!(err.to_string(), "Missing field: symbol");
    }

    #[test]
    fn test_non_numeric_score() {
        let mut value = valid_report();
        value["score"] = json!("high");
        assert!(matches!(
            report(value).summary(),
            Err(ReportError::UpstreamMalformed(_))
        ));
    }

    #[test]
    fn test_null_fields_pass_through() {
        let mut value = valid_report();
        value["tokenMeta"]["name"] = Value::Null;
        value["totalMarketLiquidity"] = json!(0);

        let summary = report(value).summary().unwrap();
        assert_eq!(summary.name, Value::Null);
        assert_eq!(summary.total_market_liquidity, json!(0));
    }

    #[test]
    fn test_report_fields_match_get() {
        let node = Node::wrap(valid_report());
        assert_eq!(node.mint().ok(), node.get("mint", None));
        assert_eq!(
            node.token_meta().unwrap().name().ok(),
            node.path("tokenMeta.name").ok()
        );
    }

    #[test]
    fn test_report_url() {
        let client = RugCheckClient::new("https://api.rugcheck.xyz/v1/", "Mozilla/5.0");
        assert_eq!(
            client.report_url("So11111111111111111111111111111111111111112"),
            "https://api.rugcheck.xyz/v1/tokens/So11111111111111111111111111111111111111112/report"
        );
        assert_eq!(
            client.report_url("a b?c"),
            "https://api.rugcheck.xyz/v1/tokens/a b?c/report"
        );
    }

    #[test]
    fn test_client_from_config() {
        let client = RugCheckClient::from_config(&Config::new());
        assert_eq!(
            client.report_url("X"),
            "https://api.rugcheck.xyz/v1/tokens/X/report"
        );
    }

    #[test]
    fn test_report_accessors() {
        let report = report(valid_report());
        assert_eq!(report.token_address(), "ABC123");
        assert_eq!(report.data().path("tokenMeta.uri").unwrap().as_str(), Some("ipfs://foo"));
        assert_eq!(report.into_data().to_value(), valid_report());
    }

    #[tokio::test]
    async fn test_malformed_base_url_is_invalid_request() {
        let client = RugCheckClient::new("not a url", "Mozilla/5.0");
        let err = client.fetch_report("ABC123").await.unwrap_err();

        assert!(matches!(err, ReportError::InvalidRequest(_)), "{err:?}");
        assert!(err.to_string().starts_with("Invalid upstream request"));
    }
}
