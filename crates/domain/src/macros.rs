/// [`Record`](crate::record::Record) をラップしたエンティティ型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`Record` をラップ、serde は透過）
/// - `from_record()` / `as_record()`
/// - `id()`: 識別子（保存前は `None`）
/// - `with_id()`: 識別子を設定したエンティティを返す
/// - `TryFrom<serde_json::Value>`: リクエストボディからの構築
///
/// # 使用例
///
/// ```rust
/// use academy_domain::course::Course;
///
/// let course = Course::try_from(serde_json::json!({ "name": "Rust 入門" })).unwrap();
/// assert_eq!(course.id(), None);
/// assert_eq!(course.name(), Some("Rust 入門"));
/// ```
macro_rules! define_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $Name($crate::record::Record);

        impl $Name {
            /// ドキュメントからエンティティを作成する
            pub fn from_record(record: $crate::record::Record) -> Self {
                Self(record)
            }

            /// 内部のドキュメント参照を取得する
            pub fn as_record(&self) -> &$crate::record::Record {
                &self.0
            }

            /// 識別子を取得する
            pub fn id(&self) -> Option<$crate::id::DocumentId> {
                self.0.id()
            }

            /// 識別子を設定したエンティティを返す
            pub fn with_id(self, id: $crate::id::DocumentId) -> Self {
                Self(self.0.with_id(id))
            }
        }

        impl TryFrom<serde_json::Value> for $Name {
            type Error = $crate::DomainError;

            fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
                $crate::record::Record::try_from(value).map(Self)
            }
        }
    };
}
