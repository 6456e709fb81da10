//! Paradex Message Payloads
//!
//! 메시지 종류별 페이로드와 필드 정규화 규칙을 정의합니다. 각 규칙은 서버 측
//! 검증 코드와 비트 단위로 일치해야 하며, 스키마 선언 순서와 함께 다이제스트를
//! 결정합니다.
//!
//! # 참조
//!
//! - [Paradex API Authentication](https://docs.paradex.trade/api/general-information/authentication)

use crate::errors::{SigningError, SigningResult};
use crate::felt::to_felt;
use crate::schema::VerificationType;
use crate::typed_data::FieldEncoding;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use starknet_types_core::felt::Felt;

/// 주문 방향 리터럴
pub const ORDER_SIDE_BUY: &str = "BUY";
pub const ORDER_SIDE_SELL: &str = "SELL";

/// 주문 타입 리터럴
pub const ORDER_TYPE_MARKET: &str = "MARKET";
pub const ORDER_TYPE_LIMIT: &str = "LIMIT";

/// 체인 수량의 소수점 자릿수 (1e8 고정소수점)
pub const QUANTUM_PRECISION: u32 = 8;

/// 소수 문자열을 quantum 정수 문자열로 변환 (내림)
///
/// 예: `"1.5"` -> `"150000000"` (precision 8)
///
/// 서명과 검증은 항상 quantum 값을 소비합니다. 호출자가 미리 스케일한 값을
/// 쓰든 이 함수를 거치든, 해시 체인에 들어가는 바이트는 같아야 합니다.
pub fn to_quantums(amount: &str, precision: u32) -> SigningResult<String> {
    if precision > 19 {
        return Err(SigningError::EncodingError {
            message: format!("unsupported quantum precision: {precision}"),
        });
    }

    let value: Decimal = amount.parse().map_err(|e| SigningError::EncodingError {
        message: format!("invalid decimal {amount:?}: {e}"),
    })?;
    let scale = Decimal::from(10u64.pow(precision));
    let quantums = value
        .checked_mul(scale)
        .ok_or_else(|| SigningError::EncodingError {
            message: format!("decimal overflow scaling {amount:?}"),
        })?
        .floor();

    Ok(quantums.normalize().to_string())
}

/// 온보딩 페이로드
///
/// 실제로 쓰이는 값은 고정 문자열 "Onboarding" 하나입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingPayload {
    pub action: String,
}

impl OnboardingPayload {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }
}

impl Default for OnboardingPayload {
    fn default() -> Self {
        Self::new("Onboarding")
    }
}

impl FieldEncoding for OnboardingPayload {
    fn encode_field(&self, field: &str) -> SigningResult<Vec<Felt>> {
        match field {
            "action" => Ok(vec![to_felt(&self.action)?]),
            other => Err(SigningError::SchemaError {
                message: format!("unknown onboarding field: {other}"),
            }),
        }
    }
}

/// 인증(JWT 발급) 요청 페이로드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub method: String,
    pub path: String,
    pub body: String,
    /// 요청 시각 (Unix 초)
    pub timestamp: i64,
    /// 서명 만료 시각 (Unix 초, 0이면 생략)
    pub expiration: i64,
}

impl AuthPayload {
    /// 표준 인증 요청 (POST /v1/auth, 빈 본문)
    pub fn new(timestamp: i64, expiration: i64) -> Self {
        Self {
            method: "POST".to_string(),
            path: "/v1/auth".to_string(),
            body: String::new(),
            timestamp,
            expiration,
        }
    }
}

impl FieldEncoding for AuthPayload {
    fn encode_field(&self, field: &str) -> SigningResult<Vec<Felt>> {
        match field {
            "method" => Ok(vec![to_felt(&self.method)?]),
            "path" => Ok(vec![to_felt(&self.path)?]),
            // 빈 문자열의 short string 인코딩은 정의되지 않으므로 본문은
            // 값과 무관하게 항상 0으로 인코딩
            "body" => Ok(vec![Felt::ZERO]),
            "timestamp" => Ok(vec![Felt::from(self.timestamp)]),
            // 만료가 0이면 요소를 내보내지 않음 (0으로 인코딩하지 않음)
            "expiration" => {
                if self.expiration == 0 {
                    Ok(Vec::new())
                } else {
                    Ok(vec![Felt::from(self.expiration)])
                }
            }
            other => Err(SigningError::SchemaError {
                message: format!("unknown auth field: {other}"),
            }),
        }
    }
}

/// 주문 페이로드
///
/// `size`와 `price`는 1e8 스케일 quantum 정수 문자열입니다. 사람이 읽는 소수
/// 값은 [`OrderPayload::new`]가 [`to_quantums`]로 변환합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// 서명 생성 시각 (Unix 밀리초) - nonce 역할
    pub timestamp: i64,
    /// 마켓 심볼 (예: "ETH-USD-PERP")
    pub market: String,
    /// 주문 방향 ("BUY" 외에는 모두 매도로 인코딩)
    pub side: String,
    /// 주문 타입 ("LIMIT" 또는 "MARKET")
    #[serde(rename = "orderType")]
    pub order_type: String,
    /// 수량 (quantum 정수 문자열)
    pub size: String,
    /// 가격 (quantum 정수 문자열, MARKET 주문은 서명 시 0으로 강제)
    pub price: String,
}

impl OrderPayload {
    /// 사람이 읽는 소수 수량/가격으로 주문 페이로드 생성
    ///
    /// # Arguments
    ///
    /// * `timestamp` - 서명 시각 (밀리초)
    /// * `market` - 마켓 심볼
    /// * `side` - 주문 방향
    /// * `order_type` - 주문 타입
    /// * `size` - 수량 소수 문자열 (예: "1.5")
    /// * `price` - 가격 소수 문자열, MARKET 주문이면 None
    pub fn new(
        timestamp: i64,
        market: impl Into<String>,
        side: impl Into<String>,
        order_type: impl Into<String>,
        size: &str,
        price: Option<&str>,
    ) -> SigningResult<Self> {
        Ok(Self {
            timestamp,
            market: market.into(),
            side: side.into(),
            order_type: order_type.into(),
            size: to_quantums(size, QUANTUM_PRECISION)?,
            price: match price {
                Some(p) => to_quantums(p, QUANTUM_PRECISION)?,
                None => "0".to_string(),
            },
        })
    }

    /// 서명용 주문 방향: "BUY"는 "1", 그 외는 전부 "2"
    fn side_for_signing(&self) -> &'static str {
        if self.side == ORDER_SIDE_BUY {
            "1"
        } else {
            "2"
        }
    }

    /// 서명용 가격: MARKET 주문은 값과 무관하게 0
    fn price_for_signing(&self) -> SigningResult<Felt> {
        if self.order_type == ORDER_TYPE_MARKET {
            Ok(Felt::ZERO)
        } else {
            to_felt(&self.price)
        }
    }
}

impl FieldEncoding for OrderPayload {
    fn encode_field(&self, field: &str) -> SigningResult<Vec<Felt>> {
        match field {
            "timestamp" => Ok(vec![Felt::from(self.timestamp)]),
            "market" => Ok(vec![to_felt(&self.market)?]),
            "side" => Ok(vec![to_felt(self.side_for_signing())?]),
            "orderType" => Ok(vec![to_felt(&self.order_type)?]),
            "size" => Ok(vec![to_felt(&self.size)?]),
            "price" => Ok(vec![self.price_for_signing()?]),
            other => Err(SigningError::SchemaError {
                message: format!("unknown order field: {other}"),
            }),
        }
    }
}

/// 서명 가능한 페이로드
///
/// 검증 종류별 변형을 하나의 태그 열거형으로 묶고 패턴 매칭으로 필드 인코딩을
/// 분기합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    Onboarding(OnboardingPayload),
    Auth(AuthPayload),
    Order(OrderPayload),
}

impl Payload {
    /// 페이로드가 속한 검증 종류
    pub fn verification_type(&self) -> VerificationType {
        match self {
            Payload::Onboarding(_) => VerificationType::Onboarding,
            Payload::Auth(_) => VerificationType::Auth,
            Payload::Order(_) => VerificationType::Order,
        }
    }
}

impl FieldEncoding for Payload {
    fn encode_field(&self, field: &str) -> SigningResult<Vec<Felt>> {
        match self {
            Payload::Onboarding(payload) => payload.encode_field(field),
            Payload::Auth(payload) => payload.encode_field(field),
            Payload::Order(payload) => payload.encode_field(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::felt::encode_short_string;

    #[test]
    fn test_to_quantums() {
        assert_eq!(to_quantums("1.5", 8).unwrap(), "150000000");
        assert_eq!(to_quantums("100", 8).unwrap(), "10000000000");
        assert_eq!(to_quantums("0.00001", 8).unwrap(), "1000");
        assert_eq!(to_quantums("2000.12345678", 8).unwrap(), "200012345678");
        // 정밀도 초과분은 내림
        assert_eq!(to_quantums("0.123456789", 8).unwrap(), "12345678");
    }

    #[test]
    fn test_to_quantums_rejects_garbage() {
        assert!(to_quantums("abc", 8).is_err());
        assert!(to_quantums("", 8).is_err());
    }

    #[test]
    fn test_order_payload_new_scales() {
        let order = OrderPayload::new(
            1684815490129,
            "ETH-USD-PERP",
            ORDER_SIDE_SELL,
            ORDER_TYPE_LIMIT,
            "20",
            Some("1900"),
        )
        .unwrap();

        assert_eq!(order.size, "2000000000");
        assert_eq!(order.price, "190000000000");
    }

    #[test]
    fn test_side_mapping() {
        let buy = OrderPayload::new(0, "ETH-USD-PERP", "BUY", "LIMIT", "1", Some("1")).unwrap();
        let sell = OrderPayload::new(0, "ETH-USD-PERP", "SELL", "LIMIT", "1", Some("1")).unwrap();
        // 인식되지 않는 방향 문자열도 매도로 취급
        let junk = OrderPayload::new(0, "ETH-USD-PERP", "HOLD", "LIMIT", "1", Some("1")).unwrap();

        assert_eq!(buy.encode_field("side").unwrap(), vec![Felt::ONE]);
        assert_eq!(sell.encode_field("side").unwrap(), vec![Felt::TWO]);
        assert_eq!(junk.encode_field("side").unwrap(), vec![Felt::TWO]);
    }

    #[test]
    fn test_market_order_price_is_zeroed() {
        let order = OrderPayload::new(
            0,
            "ETH-USD-PERP",
            "BUY",
            ORDER_TYPE_MARKET,
            "1",
            Some("1900"),
        )
        .unwrap();

        assert_eq!(order.encode_field("price").unwrap(), vec![Felt::ZERO]);
    }

    #[test]
    fn test_auth_body_is_always_zero() {
        let mut auth = AuthPayload::new(1684804350, 1685409150);
        auth.body = "ignored".to_string();

        assert_eq!(auth.encode_field("body").unwrap(), vec![Felt::ZERO]);
    }

    #[test]
    fn test_auth_zero_expiration_is_omitted() {
        let auth = AuthPayload::new(1684804350, 0);
        assert!(auth.encode_field("expiration").unwrap().is_empty());

        let auth = AuthPayload::new(1684804350, 1685409150);
        assert_eq!(
            auth.encode_field("expiration").unwrap(),
            vec![Felt::from(1685409150i64)]
        );
    }

    #[test]
    fn test_order_timestamp_is_raw_integer() {
        let order = OrderPayload::new(
            1684815490129,
            "ETH-USD-PERP",
            "SELL",
            "LIMIT",
            "1",
            Some("1"),
        )
        .unwrap();

        assert_eq!(
            order.encode_field("timestamp").unwrap(),
            vec![Felt::from(1684815490129i64)]
        );
    }

    #[test]
    fn test_market_encodes_as_short_string() {
        let order = OrderPayload::new(0, "ETH-USD-PERP", "SELL", "LIMIT", "1", Some("1")).unwrap();
        assert_eq!(
            order.encode_field("market").unwrap(),
            vec![encode_short_string("ETH-USD-PERP").unwrap()]
        );
    }

    #[test]
    fn test_payload_verification_type() {
        assert_eq!(
            Payload::Onboarding(OnboardingPayload::default()).verification_type(),
            VerificationType::Onboarding
        );
        assert_eq!(
            Payload::Auth(AuthPayload::new(0, 0)).verification_type(),
            VerificationType::Auth
        );
    }

    #[test]
    fn test_order_payload_json_roundtrip() {
        let order = OrderPayload::new(
            1684815490129,
            "ETH-USD-PERP",
            "SELL",
            "LIMIT",
            "20",
            Some("1900"),
        )
        .unwrap();

        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains(r#""orderType":"LIMIT""#));

        let parsed: OrderPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, order);
    }
}
