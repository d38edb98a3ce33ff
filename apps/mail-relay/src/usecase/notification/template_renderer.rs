//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **HTML は自動エスケープ**: `.html` テンプレートでは入力値をエスケープし、
//!   メッセージ本文の改行のみ `<br>` に変換する
//! - **未入力の表示**: 任意項目の代替文言はここで決め、HTML とテキストで共有する
//! - **受信日時**: 事業所の現地時刻（[`Clock::business_now`]）で表示する

use std::sync::Arc;

use blastenergy_domain::{
    clock::Clock,
    enquiry::Enquiry,
    notification::{EmailMessage, NotificationError, NotificationKind},
};
use tera::{Context, Tera};

use super::MailAddresses;

const NOT_PROVIDED: &str = "Not provided";
const NOT_SPECIFIED: &str = "Not specified";
const NO_MESSAGE: &str = "No additional message";

/// 例: `19 October 2026 at 02:30 pm`
const RECEIVED_AT_FORMAT: &str = "%-d %B %Y at %I:%M %P";

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、[`Enquiry`] から
/// 通知種別ごとの [`EmailMessage`] を生成する。
pub struct TemplateRenderer {
    engine: Tera,
    clock:  Arc<dyn Clock>,
}

impl TemplateRenderer {
    /// `include_str!` で埋め込んだテンプレートを tera に登録する
    pub fn new(clock: Arc<dyn Clock>) -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "owner_notification.html",
                    include_str!("../../../templates/enquiry/owner_notification.html"),
                ),
                (
                    "owner_notification.txt",
                    include_str!("../../../templates/enquiry/owner_notification.txt"),
                ),
                (
                    "customer_confirmation.html",
                    include_str!("../../../templates/enquiry/customer_confirmation.html"),
                ),
                (
                    "customer_confirmation.txt",
                    include_str!("../../../templates/enquiry/customer_confirmation.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine, clock })
    }

    /// お問い合わせからメールメッセージを生成する
    pub fn render(
        &self,
        kind: NotificationKind,
        enquiry: &Enquiry,
        addresses: &MailAddresses,
    ) -> Result<EmailMessage, NotificationError> {
        let template_name: &'static str = kind.into();
        let context = self.build_context(kind, enquiry);

        let html_body = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let email = match kind {
            NotificationKind::OwnerNotification => EmailMessage {
                sender_name: "Blast Energy Website".to_string(),
                to: addresses.owner.clone(),
                reply_to: Some(enquiry.email().to_string()),
                subject: format!(
                    "New Enquiry: {} - {}",
                    enquiry.name(),
                    enquiry.service_type()
                ),
                html_body,
                text_body,
            },
            NotificationKind::CustomerConfirmation => EmailMessage {
                sender_name: "Blast Energy".to_string(),
                to: enquiry.email().to_string(),
                reply_to: Some(addresses.operator.clone()),
                subject: "Thank you for your enquiry - Blast Energy".to_string(),
                html_body,
                text_body,
            },
        };

        Ok(email)
    }

    fn build_context(&self, kind: NotificationKind, enquiry: &Enquiry) -> Context {
        let mut context = Context::new();
        context.insert("name", enquiry.name());
        context.insert("service_type", enquiry.service_type());
        context.insert(
            "property_type",
            enquiry.property_type().unwrap_or(NOT_SPECIFIED),
        );

        match kind {
            NotificationKind::OwnerNotification => {
                let received_at = self.clock.business_now();
                context.insert("email", enquiry.email().as_str());
                context.insert("phone", enquiry.phone().unwrap_or(NOT_PROVIDED));
                context.insert(
                    "property_address",
                    enquiry.property_address().unwrap_or(NOT_PROVIDED),
                );
                context.insert("message", enquiry.message().unwrap_or(NO_MESSAGE));
                context.insert(
                    "received_at",
                    &received_at.format(RECEIVED_AT_FORMAT).to_string(),
                );
            }
            NotificationKind::CustomerConfirmation => {
                // 住所は入力された場合のみ記載する
                context.insert("property_address", &enquiry.property_address());
            }
        }

        context
    }
}

#[cfg(test)]
mod tests {
    use blastenergy_domain::{
        clock::FixedClock,
        enquiry::{EnquiryForm, Screening},
    };
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn renderer() -> TemplateRenderer {
        // 2026-10-19 14:30 ACDT (UTC+10:30)
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 4, 0, 0).unwrap();
        TemplateRenderer::new(Arc::new(FixedClock::new(now))).unwrap()
    }

    fn addresses() -> MailAddresses {
        MailAddresses {
            owner:    "owner@blastenergy.com.au".to_string(),
            operator: "info@blastenergy.com.au".to_string(),
        }
    }

    fn accept(form: EnquiryForm) -> Enquiry {
        match form.screen() {
            Screening::Accepted(enquiry) => enquiry,
            other => panic!("受理されること: {other:?}"),
        }
    }

    fn full_enquiry() -> Enquiry {
        accept(EnquiryForm {
            company:          None,
            name:             Some("Jane Doe".to_string()),
            email:            Some("jane@example.com".to_string()),
            phone:            Some("0400 000 000".to_string()),
            property_type:    Some("Residential".to_string()),
            service_type:     Some("Home Energy Audit".to_string()),
            property_address: Some("1 King William St, Adelaide".to_string()),
            message:          Some("First line\nSecond line".to_string()),
        })
    }

    fn minimal_enquiry() -> Enquiry {
        accept(EnquiryForm {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            service_type: Some("NatHERS Rating".to_string()),
            ..EnquiryForm::default()
        })
    }

    #[test]
    fn newが正常に初期化される() {
        assert!(TemplateRenderer::new(Arc::new(FixedClock::new(Utc::now()))).is_ok());
    }

    #[test]
    fn 事業者向け通知の宛先と件名() {
        let email = renderer()
            .render(
                NotificationKind::OwnerNotification,
                &full_enquiry(),
                &addresses(),
            )
            .unwrap();

        assert_eq!(email.sender_name, "Blast Energy Website");
        assert_eq!(email.to, "owner@blastenergy.com.au");
        assert_eq!(email.reply_to.as_deref(), Some("jane@example.com"));
        assert_eq!(email.subject, "New Enquiry: Jane Doe - Home Energy Audit");
    }

    #[test]
    fn 事業者向け通知に全項目と受信日時が含まれる() {
        let email = renderer()
            .render(
                NotificationKind::OwnerNotification,
                &full_enquiry(),
                &addresses(),
            )
            .unwrap();

        for body in [&email.html_body, &email.text_body] {
            assert!(body.contains("Jane Doe"));
            assert!(body.contains("jane@example.com"));
            assert!(body.contains("0400 000 000"));
            assert!(body.contains("Residential"));
            assert!(body.contains("Home Energy Audit"));
            assert!(body.contains("1 King William St, Adelaide"));
            assert!(body.contains("19 October 2026 at 02:30 pm"));
        }
        assert!(email.html_body.contains("First line<br>Second line"));
        assert!(email.text_body.contains("First line\nSecond line"));
    }

    #[test]
    fn 事業者向け通知の未入力項目は代替文言になる() {
        let email = renderer()
            .render(
                NotificationKind::OwnerNotification,
                &minimal_enquiry(),
                &addresses(),
            )
            .unwrap();

        assert!(email.text_body.contains("Phone: Not provided"));
        assert!(email.text_body.contains("Property Type: Not specified"));
        assert!(email.text_body.contains("Property Address: Not provided"));
        assert!(email.text_body.contains("No additional message"));
        assert!(email.html_body.contains("<strong>Phone:</strong> Not provided"));
        assert!(email.html_body.contains("No additional message"));
    }

    #[test]
    fn お客様向け確認の宛先と件名() {
        let email = renderer()
            .render(
                NotificationKind::CustomerConfirmation,
                &full_enquiry(),
                &addresses(),
            )
            .unwrap();

        assert_eq!(email.sender_name, "Blast Energy");
        assert_eq!(email.to, "jane@example.com");
        assert_eq!(email.reply_to.as_deref(), Some("info@blastenergy.com.au"));
        assert_eq!(email.subject, "Thank you for your enquiry - Blast Energy");
        assert!(email.html_body.contains("Dear Jane Doe"));
        assert!(email.text_body.contains("- Address: 1 King William St, Adelaide"));
    }

    #[test]
    fn お客様向け確認は住所がなければ住所行を出さない() {
        let email = renderer()
            .render(
                NotificationKind::CustomerConfirmation,
                &minimal_enquiry(),
                &addresses(),
            )
            .unwrap();

        assert!(email.text_body.contains("- Property Type: Not specified"));
        assert!(!email.text_body.contains("Address:"));
        assert!(!email.html_body.contains("Address:"));
    }

    #[test]
    fn htmlでは入力値をエスケープする() {
        let enquiry = accept(EnquiryForm {
            name: Some("<script>alert(1)</script>".to_string()),
            email: Some("jane@example.com".to_string()),
            service_type: Some("Audit & Report".to_string()),
            message: Some("<b>hi</b>".to_string()),
            ..EnquiryForm::default()
        });

        let email = renderer()
            .render(NotificationKind::OwnerNotification, &enquiry, &addresses())
            .unwrap();

        assert!(!email.html_body.contains("<script>"));
        assert!(email.html_body.contains("&lt;script&gt;"));
        assert!(email.html_body.contains("Audit &amp; Report"));
        assert!(email.html_body.contains("&lt;b&gt;hi&lt;&#x2F;b&gt;"));
        assert!(email.text_body.contains("<script>alert(1)</script>"));
    }
}
