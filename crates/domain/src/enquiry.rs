//! # お問い合わせ
//!
//! Web サイトのお問い合わせフォームから送信された内容を表現する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`EnquiryForm`] | 送信フォーム | デシリアライズしただけの未検証ペイロード |
//! | [`Enquiry`] | お問い合わせ | 必須項目とメール形式の検証を通過したもの |
//! | [`Screening`] | 受付判定 | 受理 / スパム / 却下 のいずれか |
//! | ハニーポット | `company` フィールド | 人間には見えない入力欄。値があればボットとみなす |
//!
//! ## 設計方針
//!
//! - **判定順序**: ハニーポット → 必須項目 → メール形式
//! - **スパムは成功扱い**: ボットに検出を悟らせないため、却下ではなく
//!   [`Screening::Spam`] として区別し、呼び出し側は成功レスポンスを返す
//! - **永続化しない**: リクエスト毎に生成し、レスポンス後に破棄する

use std::{num::FpCategory, sync::LazyLock};

use derive_more::Display;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use strum::IntoStaticStr;

use crate::DomainError;

/// `local@domain.tld` 形式（空白と余分な `@` を含まない）
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("メールアドレスの正規表現が不正です")
});

/// メールアドレス（値オブジェクト）
///
/// 生成時に `local@domain.tld` 形式を検証する。
/// 前後の空白はトリムせず、そのまま形式不正として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{_0}")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// メールアドレスを作成する
    ///
    /// # エラー
    ///
    /// 形式が不正な場合は `DomainError::InvalidEmail` を返す。
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if !EMAIL_PATTERN.is_match(&value) {
            return Err(DomainError::InvalidEmail);
        }
        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// お問い合わせフォームの送信内容（未検証）
///
/// JSON / form-urlencoded の両方からデシリアライズする。
/// 未知のフィールドは無視する。各フィールドは数値・真偽値も受け付ける。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryForm {
    /// ハニーポット（空であること）
    #[serde(default, deserialize_with = "lenient_text")]
    pub company:          Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name:             Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email:            Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone:            Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub property_type:    Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub service_type:     Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub property_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message:          Option<String>,
}

/// フォーム値として受け付ける JSON スカラー
#[derive(Deserialize)]
#[serde(untagged)]
enum FormScalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// 文字列以外のスカラー値も文字列として受け付ける
///
/// `null` / `0` / `false` は未入力として扱う。
/// 配列とオブジェクトはデシリアライズエラーになる。
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<FormScalar>::deserialize(deserializer)? {
        None | Some(FormScalar::Integer(0) | FormScalar::Flag(false)) => None,
        Some(FormScalar::Float(f)) if matches!(f.classify(), FpCategory::Zero | FpCategory::Nan) => {
            None
        }
        Some(FormScalar::Text(text)) => Some(text),
        Some(FormScalar::Integer(n)) => Some(n.to_string()),
        Some(FormScalar::Float(f)) => Some(f.to_string()),
        Some(FormScalar::Flag(true)) => Some("true".to_string()),
    };
    Ok(text)
}

/// 受付判定の結果
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Screening {
    /// 検証を通過した。メール送信に進む
    Accepted(Enquiry),
    /// ハニーポットに値があった。送信せずに成功を装う
    Spam,
    /// 必須項目の不足、またはメール形式の不正
    Rejected(DomainError),
}

impl EnquiryForm {
    /// 送信内容を判定する
    ///
    /// ハニーポットを最初に確認し、スパムであれば他の検証は行わない。
    pub fn screen(self) -> Screening {
        if self.is_spam() {
            return Screening::Spam;
        }

        match Enquiry::try_from(self) {
            Ok(enquiry) => Screening::Accepted(enquiry),
            Err(e) => Screening::Rejected(e),
        }
    }

    /// ハニーポットに値が入っているか
    ///
    /// 空白のみでもボットによる入力とみなす。
    pub fn is_spam(&self) -> bool {
        self.company.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// お問い合わせ（検証済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enquiry {
    name:             String,
    email:            EmailAddress,
    phone:            Option<String>,
    property_type:    Option<String>,
    service_type:     String,
    property_address: Option<String>,
    message:          Option<String>,
}

impl TryFrom<EnquiryForm> for Enquiry {
    type Error = DomainError;

    fn try_from(form: EnquiryForm) -> Result<Self, Self::Error> {
        let (Some(name), Some(email), Some(service_type)) = (
            non_blank(form.name),
            non_blank_raw(form.email),
            non_blank(form.service_type),
        ) else {
            return Err(DomainError::MissingRequiredFields);
        };

        Ok(Self {
            name,
            email: EmailAddress::parse(email)?,
            phone: non_blank(form.phone),
            property_type: non_blank(form.property_type),
            service_type,
            property_address: non_blank(form.property_address),
            message: non_blank(form.message),
        })
    }
}

impl Enquiry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn property_type(&self) -> Option<&str> {
        self.property_type.as_deref()
    }

    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    pub fn property_address(&self) -> Option<&str> {
        self.property_address.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// 前後の空白を除去し、空なら `None` にする
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 空白のみなら `None` にするが、値自体はトリムしない（メールアドレス用）
fn non_blank_raw(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn valid_form() -> EnquiryForm {
        EnquiryForm {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            service_type: Some("Home Energy Audit".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_必須項目が揃っていれば受理される() {
        let Screening::Accepted(enquiry) = valid_form().screen() else {
            panic!("受理されること");
        };

        assert_eq!(enquiry.name(), "Jane Doe");
        assert_eq!(enquiry.email().as_str(), "jane@example.com");
        assert_eq!(enquiry.service_type(), "Home Energy Audit");
        assert_eq!(enquiry.phone(), None);
        assert_eq!(enquiry.message(), None);
    }

    #[rstest]
    #[case::name欠落(EnquiryForm { name: None, ..valid_form() })]
    #[case::email欠落(EnquiryForm { email: None, ..valid_form() })]
    #[case::service_type欠落(EnquiryForm { service_type: None, ..valid_form() })]
    #[case::nameが空文字(EnquiryForm { name: Some(String::new()), ..valid_form() })]
    #[case::service_typeが空白のみ(EnquiryForm { service_type: Some("   ".to_string()), ..valid_form() })]
    fn test_必須項目が欠けていると却下される(#[case] form: EnquiryForm) {
        assert_eq!(
            form.screen(),
            Screening::Rejected(DomainError::MissingRequiredFields)
        );
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("a@b")]
    #[case("a@b.c ")]
    #[case(" a@b.c")]
    #[case("a@@b.c")]
    #[case("a b@c.d")]
    fn test_メール形式が不正だと却下される(#[case] email: &str) {
        let form = EnquiryForm {
            email: Some(email.to_string()),
            ..valid_form()
        };

        assert_eq!(form.screen(), Screening::Rejected(DomainError::InvalidEmail));
    }

    #[rstest]
    #[case("jane@example.com")]
    #[case("j.doe+enquiry@mail.example.com.au")]
    fn test_正しいメール形式は受け入れる(#[case] email: &str) {
        assert!(EmailAddress::parse(email).is_ok());
    }

    #[test]
    fn test_ハニーポットに値があればスパムと判定する() {
        let form = EnquiryForm {
            company: Some("AcmeBot".to_string()),
            ..valid_form()
        };

        assert_eq!(form.screen(), Screening::Spam);
    }

    #[test]
    fn test_ハニーポットは必須項目の検証より先に判定する() {
        let form = EnquiryForm {
            company: Some("AcmeBot".to_string()),
            ..Default::default()
        };

        assert_eq!(form.screen(), Screening::Spam);
    }

    #[test]
    fn test_ハニーポットが空文字ならスパムではない() {
        let form = EnquiryForm {
            company: Some(String::new()),
            ..valid_form()
        };

        assert!(matches!(form.screen(), Screening::Accepted(_)));
    }

    #[test]
    fn test_任意項目の空白は未入力として扱う() {
        let form = EnquiryForm {
            phone: Some("  ".to_string()),
            property_type: Some(String::new()),
            property_address: Some(" 12 Grenfell St, Adelaide ".to_string()),
            message: Some("Line one\nLine two\n".to_string()),
            ..valid_form()
        };

        let Screening::Accepted(enquiry) = form.screen() else {
            panic!("受理されること");
        };

        assert_eq!(enquiry.phone(), None);
        assert_eq!(enquiry.property_type(), None);
        assert_eq!(enquiry.property_address(), Some("12 Grenfell St, Adelaide"));
        assert_eq!(enquiry.message(), Some("Line one\nLine two"));
    }

    #[test]
    fn test_camel_caseのjsonからデシリアライズできる() {
        let json = r#"{
            "company": "",
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "0400 000 000",
            "propertyType": "House",
            "serviceType": "Home Energy Audit",
            "propertyAddress": "12 Grenfell St",
            "message": null,
            "unknownField": "ignored"
        }"#;

        let form: EnquiryForm = serde_json::from_str(json).unwrap();

        assert_eq!(form.property_type.as_deref(), Some("House"));
        assert_eq!(form.service_type.as_deref(), Some("Home Energy Audit"));
        assert_eq!(form.property_address.as_deref(), Some("12 Grenfell St"));
        assert_eq!(form.message, None);
    }

    #[test]
    fn test_数値の項目は文字列として受け付ける() {
        let json = r#"{
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": 412345678,
            "serviceType": "Home Energy Audit",
            "propertyAddress": 12.5
        }"#;

        let form: EnquiryForm = serde_json::from_str(json).unwrap();

        assert_eq!(form.phone.as_deref(), Some("412345678"));
        assert_eq!(form.property_address.as_deref(), Some("12.5"));
        assert!(matches!(form.screen(), Screening::Accepted(_)));
    }

    #[rstest]
    #[case::数値(r#"{"company": 42, "name": "Bot"}"#, true)]
    #[case::真(r#"{"company": true}"#, true)]
    #[case::ゼロ(r#"{"company": 0, "name": "Jane"}"#, false)]
    #[case::偽(r#"{"company": false, "name": "Jane"}"#, false)]
    fn test_ハニーポットの数値と真偽値(#[case] json: &str, #[case] spam: bool) {
        let form: EnquiryForm = serde_json::from_str(json).unwrap();

        assert_eq!(form.is_spam(), spam);
    }

    #[rstest]
    #[case(r#"{"name": ["Jane"]}"#)]
    #[case(r#"{"phone": {"mobile": "0400"}}"#)]
    fn test_配列やオブジェクトの項目はデシリアライズできない(#[case] json: &str) {
        assert!(serde_json::from_str::<EnquiryForm>(json).is_err());
    }

    #[test]
    fn test_判定結果の種別名() {
        let kind: &'static str = (&Screening::Spam).into();
        assert_eq!(kind, "spam");

        let kind: &'static str = (&Screening::Rejected(DomainError::InvalidEmail)).into();
        assert_eq!(kind, "rejected");
    }
}
