//! Korea Investment & Securities Open API client: quote, cash order
//! (buy/sell), balance and holdings lookups against the paper-trading
//! or live endpoint.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::RwLock;

const REAL_BASE_URL: &str = "https://openapi.koreainvestment.com:9443";
const PAPER_BASE_URL: &str = "https://openapivts.koreainvestment.com:29443";

/// Every call to the brokerage is bounded; on expiry the caller sees a
/// network-failure message, never a hang.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const NOT_CONFIGURED_MSG: &str = "한국투자증권 API가 설정되지 않았습니다.";

#[derive(Debug, Clone, Serialize)]
pub struct PriceQuote {
    pub name: String,
    pub price: i64,
    pub change: i64,
    pub change_rate: f64,
    pub volume: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountBalance {
    pub deposit: i64,
    pub total_value: i64,
    pub profit_loss: i64,
    pub profit_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Holding {
    pub name: String,
    pub code: String,
    pub quantity: i64,
    pub avg_price: i64,
    pub current_price: i64,
    pub profit_loss: i64,
    pub profit_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderAck {
    pub order_no: String,
}

#[derive(Deserialize)]
struct KisEnvelope {
    rt_cd: String,
    #[serde(default)]
    msg1: Option<String>,
    #[serde(default)]
    output: Option<Value>,
    #[serde(default)]
    output1: Option<Value>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

// KIS serializes every numeric field as a string.
fn field_str(v: &Value, key: &str) -> String {
    v.get(key).and_then(Value::as_str).unwrap_or("").to_string()
}

// Some amount fields arrive with a decimal part ("71234.00").
fn field_i64(v: &Value, key: &str) -> i64 {
    v.get(key)
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<f64>().ok())
        .map(|n| n as i64)
        .unwrap_or(0)
}

fn field_f64(v: &Value, key: &str) -> f64 {
    v.get(key)
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0)
}

#[derive(Clone)]
pub struct KisClient {
    http: Client,
    app_key: String,
    app_secret: String,
    account_no: String,
    is_real: bool,
    base_url: &'static str,
    token: Arc<RwLock<Option<String>>>,
}

impl KisClient {
    pub fn new(app_key: String, app_secret: String, account_no: String, is_real: bool) -> Self {
        Self {
            http: Client::new(),
            app_key,
            app_secret,
            account_no,
            is_real,
            base_url: if is_real { REAL_BASE_URL } else { PAPER_BASE_URL },
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.app_key.trim().is_empty()
            && !self.app_secret.trim().is_empty()
            && !self.account_no.trim().is_empty()
    }

    /// OAuth access token, fetched on first use and cached. KIS tokens
    /// live 24h; a restart renews them.
    async fn access_token(&self) -> Result<String, String> {
        if let Some(tok) = self.token.read().await.as_ref() {
            return Ok(tok.clone());
        }

        let url = format!("{}/oauth2/tokenP", self.base_url);
        let body = json!({
            "grant_type": "client_credentials",
            "appkey": self.app_key,
            "appsecret": self.app_secret,
        });

        let res = self
            .http
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("네트워크 오류: {e}"))?;

        if !res.status().is_success() {
            return Err(format!("토큰 발급 실패: HTTP {}", res.status()));
        }

        let tok = res
            .json::<TokenResponse>()
            .await
            .map_err(|e| format!("토큰 발급 실패: {e}"))?
            .access_token;

        *self.token.write().await = Some(tok.clone());
        tracing::info!("KIS access token issued");
        Ok(tok)
    }

    async fn headers(&self, tr_id: &str) -> Result<Vec<(&'static str, String)>, String> {
        let token = self.access_token().await?;
        Ok(vec![
            ("authorization", format!("Bearer {token}")),
            ("appkey", self.app_key.clone()),
            ("appsecret", self.app_secret.clone()),
            ("tr_id", tr_id.to_string()),
            ("custtype", "P".to_string()),
        ])
    }

    async fn get(&self, path: &str, tr_id: &str, params: &[(&str, &str)]) -> Result<KisEnvelope, String> {
        let url = format!("{}{path}", self.base_url);
        let mut req = self.http.get(&url).timeout(REQUEST_TIMEOUT).query(params);
        for (k, v) in self.headers(tr_id).await? {
            req = req.header(k, v);
        }

        let res = req.send().await.map_err(|e| format!("네트워크 오류: {e}"))?;
        if !res.status().is_success() {
            return Err(format!("API 오류: HTTP {}", res.status()));
        }
        res.json::<KisEnvelope>()
            .await
            .map_err(|e| format!("응답 해석 실패: {e}"))
    }

    async fn post(&self, path: &str, tr_id: &str, body: &Value) -> Result<KisEnvelope, String> {
        let url = format!("{}{path}", self.base_url);
        let mut req = self.http.post(&url).timeout(REQUEST_TIMEOUT).json(body);
        for (k, v) in self.headers(tr_id).await? {
            req = req.header(k, v);
        }

        let res = req.send().await.map_err(|e| format!("네트워크 오류: {e}"))?;
        if !res.status().is_success() {
            return Err(format!("API 오류: HTTP {}", res.status()));
        }
        res.json::<KisEnvelope>()
            .await
            .map_err(|e| format!("응답 해석 실패: {e}"))
    }

    fn check_ok(env: &KisEnvelope) -> Result<(), String> {
        if env.rt_cd == "0" {
            Ok(())
        } else {
            Err(env
                .msg1
                .clone()
                .unwrap_or_else(|| "알 수 없는 오류".to_string()))
        }
    }

    pub async fn get_current_price(&self, code: &str) -> Result<PriceQuote, String> {
        if !self.is_configured() {
            return Err(NOT_CONFIGURED_MSG.to_string());
        }

        let env = self
            .get(
                "/uapi/domestic-stock/v1/quotations/inquire-price",
                "FHKST01010100",
                &[("FID_COND_MRKT_DIV_CODE", "J"), ("FID_INPUT_ISCD", code)],
            )
            .await?;
        Self::check_ok(&env).map_err(|m| format!("조회 실패: {m}"))?;

        let output = env.output.unwrap_or(Value::Null);
        Ok(PriceQuote {
            name: field_str(&output, "hts_kor_isnm"),
            price: field_i64(&output, "stck_prpr"),
            change: field_i64(&output, "prdy_vrss"),
            change_rate: field_f64(&output, "prdy_ctrt"),
            volume: field_i64(&output, "acml_vol"),
        })
    }

    /// Cash order. `quantity` must already be an absolute share count;
    /// entire-position resolution happens in the command service.
    async fn place_order(
        &self,
        tr_id: &str,
        verb: &str,
        code: &str,
        quantity: i64,
        limit_price: i64,
        is_market: bool,
    ) -> Result<OrderAck, String> {
        // 01 = market, 00 = limit.
        let (ord_dvsn, ord_unpr) = if is_market {
            ("01", "0".to_string())
        } else {
            ("00", limit_price.to_string())
        };

        let body = json!({
            "CANO": self.account_no,
            "ACNT_PRDT_CD": "01",
            "PDNO": code,
            "ORD_DVSN": ord_dvsn,
            "ORD_QTY": quantity.to_string(),
            "ORD_UNPR": ord_unpr,
        });

        let env = self
            .post("/uapi/domestic-stock/v1/trading/order-cash", tr_id, &body)
            .await?;
        Self::check_ok(&env).map_err(|m| format!("{verb} 실패: {m}"))?;

        let output = env.output.unwrap_or(Value::Null);
        Ok(OrderAck {
            order_no: field_str(&output, "ODNO"),
        })
    }

    pub async fn buy(
        &self,
        code: &str,
        quantity: i64,
        limit_price: i64,
        is_market: bool,
    ) -> Result<OrderAck, String> {
        if !self.is_configured() {
            return Err(NOT_CONFIGURED_MSG.to_string());
        }
        let tr_id = if self.is_real { "TTTC0802U" } else { "VTTC0802U" };
        self.place_order(tr_id, "매수", code, quantity, limit_price, is_market)
            .await
    }

    pub async fn sell(
        &self,
        code: &str,
        quantity: i64,
        limit_price: i64,
        is_market: bool,
    ) -> Result<OrderAck, String> {
        if !self.is_configured() {
            return Err(NOT_CONFIGURED_MSG.to_string());
        }
        // Sell uses a different tr_id than buy.
        let tr_id = if self.is_real { "TTTC0801U" } else { "VTTC0801U" };
        self.place_order(tr_id, "매도", code, quantity, limit_price, is_market)
            .await
    }

    pub async fn get_balance(&self) -> Result<AccountBalance, String> {
        if !self.is_configured() {
            return Err(NOT_CONFIGURED_MSG.to_string());
        }

        let tr_id = if self.is_real { "TTTC8908R" } else { "VTTC8908R" };
        let env = self
            .get(
                "/uapi/domestic-stock/v1/trading/inquire-psbl-order",
                tr_id,
                &[
                    ("CANO", self.account_no.as_str()),
                    ("ACNT_PRDT_CD", "01"),
                    ("PDNO", ""),
                    ("ORD_UNPR", "0"),
                    ("ORD_DVSN", "01"),
                    ("CMA_EVLU_AMT_ICLD_YN", "Y"),
                    ("OVRS_ICLD_YN", "N"),
                ],
            )
            .await?;
        Self::check_ok(&env).map_err(|m| format!("조회 실패: {m}"))?;

        let output = env.output.unwrap_or(Value::Null);
        Ok(AccountBalance {
            deposit: field_i64(&output, "dnca_tot_amt"),
            total_value: field_i64(&output, "tot_evlu_amt"),
            profit_loss: field_i64(&output, "evlu_pfls_smtl_amt"),
            profit_rate: field_f64(&output, "tot_evlu_pfls_rt"),
        })
    }

    pub async fn get_holdings(&self) -> Result<Vec<Holding>, String> {
        if !self.is_configured() {
            return Err(NOT_CONFIGURED_MSG.to_string());
        }

        let tr_id = if self.is_real { "TTTC8434R" } else { "VTTC8434R" };
        let env = self
            .get(
                "/uapi/domestic-stock/v1/trading/inquire-balance",
                tr_id,
                &[
                    ("CANO", self.account_no.as_str()),
                    ("ACNT_PRDT_CD", "01"),
                    ("AFHR_FLPR_YN", "N"),
                    ("OFL_YN", ""),
                    ("INQR_DVSN", "02"),
                    ("UNPR_DVSN", "01"),
                    ("FUND_STTL_ICLD_YN", "N"),
                    ("FNCG_AMT_AUTO_RDPT_YN", "N"),
                    ("PRCS_DVSN", "01"),
                    ("CTX_AREA_FK100", ""),
                    ("CTX_AREA_NK100", ""),
                ],
            )
            .await?;
        Self::check_ok(&env).map_err(|m| format!("조회 실패: {m}"))?;

        let items = env
            .output1
            .as_ref()
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut holdings = vec![];
        for item in &items {
            let quantity = field_i64(item, "hldg_qty");
            if quantity <= 0 {
                continue;
            }
            holdings.push(Holding {
                name: field_str(item, "prdt_name"),
                code: field_str(item, "pdno"),
                quantity,
                avg_price: field_i64(item, "pchs_avg_pric"),
                current_price: field_i64(item, "prpr"),
                profit_loss: field_i64(item, "evlu_pfls_amt"),
                profit_rate: field_f64(item, "evlu_pfls_rt"),
            });
        }
        Ok(holdings)
    }
}
