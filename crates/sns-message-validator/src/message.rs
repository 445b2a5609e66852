//! # Wire Message Decoding
//!
//! Turns a JSON SNS message into a [`MessageFieldMap`].
//!
//! Two shapes are accepted: HTTP(S) endpoints receive `SubscribeURL`,
//! `SigningCertURL` and `UnsubscribeURL`, while Lambda records spell them
//! `SubscribeUrl`, `SigningCertUrl` and `UnsubscribeUrl`. Missing and `null`
//! fields decode to the empty string, which the validator treats as absent.

use crate::domain::entities::{Field, MessageFieldMap};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Error decoding a wire message.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is not a JSON object of string fields
    #[error("{0}")]
    MalformedJson(#[from] serde_json::Error),
}

impl DecodeError {
    /// Stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::MalformedJson(_) => "MalformedJSON",
        }
    }
}

/// An SNS message as delivered on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnsMessage {
    #[serde(rename = "Type", deserialize_with = "null_as_empty")]
    pub message_type: String,
    #[serde(rename = "MessageId", deserialize_with = "null_as_empty")]
    pub message_id: String,
    #[serde(rename = "Token", deserialize_with = "null_as_empty")]
    pub token: String,
    #[serde(rename = "TopicArn", deserialize_with = "null_as_empty")]
    pub topic_arn: String,
    #[serde(rename = "Message", deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(rename = "Subject", deserialize_with = "null_as_empty")]
    pub subject: String,
    #[serde(
        rename = "SubscribeURL",
        alias = "SubscribeUrl",
        deserialize_with = "null_as_empty"
    )]
    pub subscribe_url: String,
    #[serde(rename = "Timestamp", deserialize_with = "null_as_empty")]
    pub timestamp: String,
    #[serde(rename = "SignatureVersion", deserialize_with = "null_as_empty")]
    pub signature_version: String,
    #[serde(rename = "Signature", deserialize_with = "null_as_empty")]
    pub signature: String,
    #[serde(
        rename = "SigningCertURL",
        alias = "SigningCertUrl",
        deserialize_with = "null_as_empty"
    )]
    pub signing_cert_url: String,
    #[serde(
        rename = "UnsubscribeURL",
        alias = "UnsubscribeUrl",
        deserialize_with = "null_as_empty"
    )]
    pub unsubscribe_url: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SnsMessage {
    /// Decode a JSON-encoded SNS message.
    pub fn from_json(encoded: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(encoded)?)
    }

    /// Value of a field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Type => &self.message_type,
            Field::MessageId => &self.message_id,
            Field::Token => &self.token,
            Field::TopicArn => &self.topic_arn,
            Field::Message => &self.message,
            Field::Subject => &self.subject,
            Field::SubscribeUrl => &self.subscribe_url,
            Field::Timestamp => &self.timestamp,
            Field::SignatureVersion => &self.signature_version,
            Field::Signature => &self.signature,
            Field::SigningCertUrl => &self.signing_cert_url,
            Field::UnsubscribeUrl => &self.unsubscribe_url,
        }
    }

    /// Field map with all twelve keys; absent fields map to `""`.
    pub fn to_field_map(&self) -> MessageFieldMap {
        Field::ALL
            .iter()
            .map(|field| (field.as_str(), self.field(*field)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER_SHAPE: &str = r#"{
        "Type": "Notification",
        "MessageId": "165545c9-2a5c-472c-8df2-7ff2be2b3b1b",
        "TopicArn": "arn:aws:sns:us-west-2:123456789012:MyTopic",
        "Subject": "Test subject",
        "Message": "Test notification",
        "Timestamp": "2012-04-26T20:45:04.751Z",
        "SignatureVersion": "1",
        "Signature": "EXAMPLEpH+DcEwjAPg8O9mY8dReBSwksfg2S=",
        "SigningCertURL": "https://sns.us-west-2.amazonaws.com/cert.pem",
        "UnsubscribeURL": "https://sns.us-west-2.amazonaws.com/?Action=Unsubscribe"
    }"#;

    const LAMBDA_SHAPE: &str = r#"{
        "Type": "Notification",
        "MessageId": "165545c9-2a5c-472c-8df2-7ff2be2b3b1b",
        "TopicArn": "arn:aws:sns:us-west-2:123456789012:MyTopic",
        "Subject": null,
        "Message": "Test notification",
        "Timestamp": "2012-04-26T20:45:04.751Z",
        "SignatureVersion": "1",
        "Signature": "EXAMPLEpH+DcEwjAPg8O9mY8dReBSwksfg2S=",
        "SigningCertUrl": "https://sns.us-west-2.amazonaws.com/cert.pem",
        "UnsubscribeUrl": "https://sns.us-west-2.amazonaws.com/?Action=Unsubscribe",
        "MessageAttributes": {}
    }"#;

    #[test]
    fn test_decode_server_shape() {
        let message = SnsMessage::from_json(SERVER_SHAPE.as_bytes()).unwrap();

        assert_eq!(message.message_type, "Notification");
        assert_eq!(
            message.signing_cert_url,
            "https://sns.us-west-2.amazonaws.com/cert.pem"
        );
        assert_eq!(message.token, "");
    }

    #[test]
    fn test_decode_lambda_shape() {
        let message = SnsMessage::from_json(LAMBDA_SHAPE.as_bytes()).unwrap();

        assert_eq!(
            message.signing_cert_url,
            "https://sns.us-west-2.amazonaws.com/cert.pem"
        );
        assert_eq!(
            message.unsubscribe_url,
            "https://sns.us-west-2.amazonaws.com/?Action=Unsubscribe"
        );
        assert_eq!(message.subject, "");
    }

    #[test]
    fn test_field_map_has_full_vocabulary() {
        let fields = SnsMessage::from_json(SERVER_SHAPE.as_bytes())
            .unwrap()
            .to_field_map();

        assert_eq!(fields.len(), Field::ALL.len());
        assert_eq!(fields.get(Field::Subject), Some("Test subject"));
        assert_eq!(fields.get(Field::Token), None);
        assert_eq!(
            fields.get(Field::SigningCertUrl),
            Some("https://sns.us-west-2.amazonaws.com/cert.pem")
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = SnsMessage::from_json(b"{\"Type\": ").unwrap_err();

        assert_eq!(err.kind(), "MalformedJSON");
    }

    #[test]
    fn test_non_string_field_is_malformed() {
        let err = SnsMessage::from_json(br#"{"Type": 42}"#).unwrap_err();

        assert!(matches!(err, DecodeError::MalformedJson(_)));
    }
}
