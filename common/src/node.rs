// Standard library imports
use std::{collections::BTreeMap, fmt};

// Third party imports
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

// Internal imports
use crate::error::{NodeError, NodeResult};

/// Cây điều hướng bọc quanh một giá trị JSON tuỳ ý.
///
/// Mọi mapping ở bất kỳ độ sâu nào (kể cả mapping nằm trong mảng) đều trở thành
/// [`Node::Object`] và có thể tra cứu theo key. Scalar và mảng không có tra cứu theo key.
///
/// `Node::wrap(v).to_value() == v` với mọi giá trị JSON `v`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// null, bool, number hoặc string. Không bao giờ chứa object hay array:
    /// tạo node qua [`Node::wrap`] hoặc [`Node::scalar`], không dựng trực tiếp.
    Scalar(Value),
    /// Dãy có thứ tự
    List(Vec<Node>),
    /// Mapping từ key sang node con
    Object(BTreeMap<String, Node>),
}

impl Node {
    /// Bọc một giá trị JSON thành cây node. Không bao giờ thất bại.
    pub fn wrap(value: Value) -> Self {
        match value {
            Value::Object(map) => Node::Object(
                map.into_iter()
                    .map(|(key, child)| (key, Node::wrap(child)))
                    .collect(),
            ),
            Value::Array(items) => Node::List(items.into_iter().map(Node::wrap).collect()),
            scalar => Node::scalar(scalar),
        }
    }

    /// Tạo node scalar. `value` phải là null, bool, number hoặc string.
    pub fn scalar(value: Value) -> Self {
        debug_assert!(
            !value.is_object() && !value.is_array(),
            "Node::scalar nhận object/array, hãy dùng Node::wrap"
        );
        Node::Scalar(value)
    }

    /// Chuyển cây node ngược lại thành JSON thuần.
    pub fn to_value(&self) -> Value {
        match self {
            Node::Scalar(value) => value.clone(),
            Node::List(items) => Value::Array(items.iter().map(Node::to_value).collect()),
            Node::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, child)| (key.clone(), child.to_value()))
                    .collect(),
            ),
        }
    }

    /// Giống [`Node::to_value`] nhưng tiêu thụ node, không clone.
    pub fn into_value(self) -> Value {
        match self {
            Node::Scalar(value) => value,
            Node::List(items) => Value::Array(items.into_iter().map(Node::into_value).collect()),
            Node::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, child)| (key, child.into_value()))
                    .collect(),
            ),
        }
    }

    /// Tra cứu một cấp theo `key`.
    ///
    /// Trả về `default` nếu node không phải Object hoặc không có key này.
    pub fn get<'a>(&'a self, key: &str, default: Option<&'a Node>) -> Option<&'a Node> {
        match self {
            Node::Object(fields) => fields.get(key).or(default),
            _ => default,
        }
    }

    /// Truy cập kiểu thuộc tính: key phải tồn tại, nếu không trả về [`NodeError::MissingField`].
    pub fn field(&self, key: &str) -> NodeResult<&Node> {
        self.get(key, None).ok_or_else(|| NodeError::missing(key))
    }

    /// Truy cập chuỗi thuộc tính theo đường dẫn có dấu chấm, ví dụ `tokenMeta.name`.
    ///
    /// Lỗi mang theo toàn bộ đường dẫn.
    pub fn path(&self, dotted: &str) -> NodeResult<&Node> {
        dotted
            .split('.')
            .try_fold(self, |node, key| node.get(key, None))
            .ok_or_else(|| NodeError::missing(dotted))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Node::List(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Value::Null))
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(value) => value.as_str(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Scalar(value) => value.as_bool(),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Node::Scalar(Value::Number(number)) => Some(number),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    /// Các key trực tiếp của Object (rỗng với scalar và mảng)
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.as_object()
            .into_iter()
            .flat_map(|fields| fields.keys().map(String::as_str))
    }

    /// Số phần tử con trực tiếp; scalar luôn là 0
    pub fn len(&self) -> usize {
        match self {
            Node::Scalar(_) => 0,
            Node::List(items) => items.len(),
            Node::Object(fields) => fields.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::wrap(value)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        node.into_value()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(value) => value.serialize(serializer),
            Node::List(items) => items.serialize(serializer),
            Node::Object(fields) => fields.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Node::wrap)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
