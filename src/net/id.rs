//! 标识符类型
//!
//! arena 下标形式的元素标识符。元素之间的关系只保存这些下标，不保存引用。

use serde::{Deserialize, Serialize};

/// OLT 标识符（每个网络至多一个 OLT，下标恒为 0）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OltId(pub usize);

/// 分光器标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SplitterId(pub usize);

/// ONU 标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OnuId(pub usize);

/// 光纤段标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FiberId(pub usize);

/// 光纤端点：可以是任意类型的元素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRef {
    Olt(OltId),
    Splitter(SplitterId),
    Onu(OnuId),
    Fiber(FiberId),
}

/// 元素类型标签（序列化时作为 `type` 字段）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementKind {
    Olt,
    Onu,
    Splitter,
    Fiber,
}

impl ElementRef {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementRef::Olt(_) => ElementKind::Olt,
            ElementRef::Splitter(_) => ElementKind::Splitter,
            ElementRef::Onu(_) => ElementKind::Onu,
            ElementRef::Fiber(_) => ElementKind::Fiber,
        }
    }
}

impl From<SplitterId> for ElementRef {
    fn from(id: SplitterId) -> Self {
        ElementRef::Splitter(id)
    }
}

impl From<OnuId> for ElementRef {
    fn from(id: OnuId) -> Self {
        ElementRef::Onu(id)
    }
}

impl From<OltId> for ElementRef {
    fn from(id: OltId) -> Self {
        ElementRef::Olt(id)
    }
}
