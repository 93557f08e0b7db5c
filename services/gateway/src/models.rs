use matching_engine::DepthLevel;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use types::account::Balances;
use types::errors::ExchangeError;
use types::ids::UserId;
use types::numeric::{Price, Quantity};
use types::order::Side;

/// Raw order body; fields are validated by `into_order`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub side: Option<String>,
    pub price: Option<Value>,
    pub quantity: Option<Value>,
    pub user_id: Option<Value>,
}

/// Validated limit order
#[derive(Debug, Clone, PartialEq)]
pub struct LimitOrder {
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    pub user_id: UserId,
}

impl CreateOrderRequest {
    pub fn into_order(self) -> Result<LimitOrder, ExchangeError> {
        let price = parse_decimal("price", self.price.as_ref())?;
        Ok(LimitOrder {
            side: parse_side(self.side.as_deref())?,
            price: Price::try_from(price)?,
            quantity: parse_quantity(self.quantity.as_ref())?,
            user_id: parse_user(self.user_id.as_ref())?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub side: Option<String>,
    pub quantity: Option<Value>,
    pub user_id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteQuery {
    pub side: Side,
    pub quantity: Quantity,
    pub user_id: UserId,
}

impl QuoteRequest {
    pub fn into_query(self) -> Result<QuoteQuery, ExchangeError> {
        Ok(QuoteQuery {
            side: parse_side(self.side.as_deref())?,
            quantity: parse_quantity(self.quantity.as_ref())?,
            user_id: parse_user(self.user_id.as_ref())?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub filled_quantity: Quantity,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepthResponse {
    /// Keyed by normalized price text
    pub depth: BTreeMap<String, DepthLevel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    pub balances: Balances,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub quote: Decimal,
}

fn missing(field: &str) -> ExchangeError {
    ExchangeError::InvalidParameters(format!("missing required parameter '{}'", field))
}

fn parse_side(side: Option<&str>) -> Result<Side, ExchangeError> {
    side.ok_or_else(|| missing("side"))?
        .parse()
        .map_err(ExchangeError::InvalidParameters)
}

/// JSON numbers and numeric strings are both accepted
fn parse_decimal(field: &str, value: Option<&Value>) -> Result<Decimal, ExchangeError> {
    let malformed = || ExchangeError::InvalidParameters(format!("'{}' must be a number", field));
    let text = match value {
        None | Some(Value::Null) => return Err(missing(field)),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => return Err(malformed()),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| malformed())
}

fn parse_quantity(value: Option<&Value>) -> Result<Quantity, ExchangeError> {
    let quantity = parse_decimal("quantity", value)?;
    if quantity <= Decimal::ZERO {
        return Err(ExchangeError::InvalidParameters(format!(
            "quantity must be positive, got {}",
            quantity
        )));
    }
    Ok(Quantity::try_from(quantity)?)
}

/// User ids may arrive as strings or bare integers
fn parse_user(value: Option<&Value>) -> Result<UserId, ExchangeError> {
    let raw = match value {
        None | Some(Value::Null) => return Err(missing("userId")),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.is_u64() => n.to_string(),
        Some(_) => {
            return Err(ExchangeError::InvalidParameters("'userId' must be a string".to_string()));
        }
    };
    UserId::try_new(raw).ok_or_else(|| missing("userId"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_request(body: Value) -> CreateOrderRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_valid_order() {
        let order = order_request(json!({"side": "bid", "price": 100, "quantity": 5, "userId": "1"}))
            .into_order()
            .unwrap();

        assert_eq!(order.side, Side::Bid);
        assert_eq!(order.price, Price::from_u64(100));
        assert_eq!(order.quantity, Quantity::from_u64(5));
        assert_eq!(order.user_id.as_str(), "1");
    }

    #[test]
    fn test_numeric_strings_and_integer_user() {
        let order = order_request(json!({"side": "ask", "price": "99.5", "quantity": "2", "userId": 2}))
            .into_order()
            .unwrap();

        assert_eq!(order.price, "99.5".parse().unwrap());
        assert_eq!(order.user_id.as_str(), "2");
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = order_request(json!({"side": "bid", "quantity": 5, "userId": "1"}))
            .into_order()
            .unwrap_err();
        assert!(err.to_string().contains("price"));

        assert!(order_request(json!({"price": 1, "quantity": 5, "userId": "1"})).into_order().is_err());
        assert!(order_request(json!({"side": "bid", "price": 1, "quantity": 5})).into_order().is_err());
        assert!(order_request(json!({"side": "bid", "price": 1, "quantity": 5, "userId": ""})).into_order().is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            json!({"side": "buy", "price": 1, "quantity": 5, "userId": "1"}),
            json!({"side": "bid", "price": 0, "quantity": 5, "userId": "1"}),
            json!({"side": "bid", "price": -4, "quantity": 5, "userId": "1"}),
            json!({"side": "bid", "price": 1, "quantity": 0, "userId": "1"}),
            json!({"side": "bid", "price": "abc", "quantity": 5, "userId": "1"}),
            json!({"side": "bid", "price": true, "quantity": 5, "userId": "1"}),
        ];
        for body in cases {
            let err = order_request(body.clone()).into_order().unwrap_err();
            assert!(matches!(err, ExchangeError::InvalidParameters(_)), "accepted {}", body);
        }
    }

    #[test]
    fn test_quote_request() {
        let request: QuoteRequest =
            serde_json::from_value(json!({"side": "bid", "quantity": 3, "userId": "1"})).unwrap();
        let query = request.into_query().unwrap();
        assert_eq!(query.side, Side::Bid);
        assert_eq!(query.quantity, Quantity::from_u64(3));
    }

    #[test]
    fn test_order_response_field_name() {
        let body = serde_json::to_value(OrderResponse { filled_quantity: Quantity::from_u64(3) }).unwrap();
        assert_eq!(body, json!({"filledQuantity": "3"}));
    }
}
