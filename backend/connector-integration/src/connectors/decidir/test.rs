#[cfg(test)]
mod tests {
    use common_enums::{AttemptStatus, CaptureMethod, RefundStatus, StandardErrorCode};
    use domain_types::{
        connector_types::{PaymentsResponseData, ResponseId},
        errors::ConnectorError,
        router_data::ConnectorAuthType,
    };
    use interfaces::{api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2};
    use serde_json::{json, Value};

    use crate::{connectors::Decidir, test_utils::*};

    fn auth() -> ConnectorAuthType {
        header_key("566f2c897b5e4bfaa0ec2452f5d67f13")
    }

    fn json_body(body: &str) -> Value {
        serde_json::from_str(body).unwrap()
    }

    mod authorize_tests {
        use super::*;

        #[test]
        fn payment_request_maps_card_and_defaults() {
            let body = json_body(&request_body(Decidir::new(), &authorize(auth(), None)));

            assert_eq!(body["site_transaction_id"], "order_1001");
            assert_eq!(body["payment_method_id"], 1);
            assert_eq!(body["card_data"]["card_number"], CARD_NUMBER);
            assert_eq!(body["card_data"]["card_expiration_month"], "09");
            assert_eq!(body["card_data"]["card_expiration_year"], "30");
            assert_eq!(body["card_data"]["security_code"], CVC);
            assert_eq!(body["card_data"]["card_holder_name"], "Longbob Longsen");
            assert_eq!(body["bin"], "411111");
            assert_eq!(body["amount"], 1000);
            assert_eq!(body["currency"], "USD");
            assert_eq!(body["installments"], 1);
            assert_eq!(body["payment_type"], "single");
            assert_eq!(body["sub_payments"], json!([]));
            assert_eq!(body["customer"]["email"], "jim@example.com");
            assert!(body.get("establishment_name").is_none());
        }

        #[test]
        fn metadata_sets_installments_and_establishment() {
            let mut router_data = authorize(auth(), None);
            router_data.request.metadata = Some(json!({
                "installments": "12",
                "payment_method_id": 15,
                "establishment_name": "Heavenly Buffaloes and Sons Ltd"
            }));
            let body = json_body(&request_body(Decidir::new(), &router_data));

            assert_eq!(body["installments"], 12);
            assert_eq!(body["payment_method_id"], 15);
            assert_eq!(body["establishment_name"], "Heavenly Buffaloes and So");
        }

        #[test]
        fn malformed_installments_are_rejected() {
            let mut router_data = authorize(auth(), None);
            router_data.request.metadata = Some(json!({"installments": "twelve"}));
            let error = ConnectorIntegrationV2::get_request_body(Decidir::new(), &router_data)
                .unwrap_err();
            assert!(matches!(
                error.current_context(),
                ConnectorError::InvalidDataFormat { .. }
            ));
        }

        #[test]
        fn token_payment_omits_card_data() {
            let router_data = router_data(
                payment_flow_data(),
                auth(),
                authorize_data(card_token("9ae1d130-8c89-4c3b-a267-0e97b88fedd0"), None),
            );
            let body = json_body(&request_body(Decidir::new(), &router_data));
            assert_eq!(body["token"], "9ae1d130-8c89-4c3b-a267-0e97b88fedd0");
            assert!(body.get("card_data").is_none());
            assert!(body.get("bin").is_none());
        }

        #[test]
        fn apikey_header_is_sent() {
            let headers =
                ConnectorIntegrationV2::get_headers(Decidir::new(), &authorize(auth(), None))
                    .unwrap();
            let api_key = headers
                .into_iter()
                .find(|(name, _)| name == "apikey")
                .map(|(_, value)| value.into_inner())
                .unwrap();
            assert_eq!(api_key, "566f2c897b5e4bfaa0ec2452f5d67f13");
        }

        #[test]
        fn approved_payment_is_charged() {
            let result = handle_response(
                Decidir::new(),
                &authorize(auth(), None),
                201,
                r#"{
                    "id": 7719132,
                    "site_transaction_id": "order_1001",
                    "payment_method_id": 1,
                    "amount": 1000,
                    "currency": "ars",
                    "status": "approved",
                    "status_details": {
                        "ticket": "7156",
                        "card_authorization_code": "174838",
                        "address_validation_code": "VTE0011",
                        "error": null
                    }
                }"#,
            );

            assert_eq!(result.resource_common_data.status, AttemptStatus::Charged);
            match result.response {
                Ok(PaymentsResponseData::TransactionResponse {
                    resource_id,
                    network_txn_id,
                    connector_response_reference_id,
                    ..
                }) => {
                    assert_eq!(
                        resource_id,
                        ResponseId::ConnectorTransactionId("7719132".to_string())
                    );
                    assert_eq!(network_txn_id.as_deref(), Some("7156"));
                    assert_eq!(connector_response_reference_id.as_deref(), Some("174838"));
                }
                other => panic!("unexpected response {other:?}"),
            }
        }

        #[test]
        fn pre_approved_payment_is_authorized() {
            let result = handle_response(
                Decidir::new(),
                &authorize(auth(), Some(CaptureMethod::Manual)),
                201,
                r#"{"id": 7720214, "status": "pre_approved", "status_details": {"ticket": "8187"}}"#,
            );
            assert_eq!(result.resource_common_data.status, AttemptStatus::Authorized);
        }

        #[test]
        fn rejected_payment_reads_reason() {
            let result = handle_response(
                Decidir::new(),
                &authorize(auth(), None),
                201,
                r#"{
                    "id": 7719351,
                    "status": "rejected",
                    "status_details": {
                        "ticket": "7162",
                        "card_authorization_code": "",
                        "error": {
                            "type": "invalid_card",
                            "reason": {
                                "id": 3,
                                "description": "COMERCIO INVALIDO",
                                "additional_description": ""
                            }
                        }
                    }
                }"#,
            );

            assert_eq!(result.resource_common_data.status, AttemptStatus::Failure);
            let error = result.response.unwrap_err();
            assert_eq!(error.code, "3");
            assert_eq!(error.message, "COMERCIO INVALIDO");
            assert_eq!(error.standard_error_code, Some(StandardErrorCode::ConfigError));
            assert_eq!(error.attempt_status, Some(AttemptStatus::Failure));
            assert_eq!(error.connector_transaction_id.as_deref(), Some("7719351"));
        }
    }

    mod follow_up_tests {
        use super::*;

        #[test]
        fn capture_puts_amount_on_payment() {
            let router_data = capture(auth(), "7720214", 750);
            assert_eq!(
                ConnectorIntegrationV2::get_url(Decidir::new(), &router_data).unwrap(),
                "https://decidir.test/payments/7720214"
            );
            assert_eq!(request_body(Decidir::new(), &router_data), r#"{"amount":750}"#);

            let result = handle_response(
                Decidir::new(),
                &router_data,
                200,
                r#"{"id": 7720214, "amount": 750, "status": "approved"}"#,
            );
            assert_eq!(result.resource_common_data.status, AttemptStatus::Charged);
        }

        #[test]
        fn void_is_an_empty_refund() {
            let router_data = void(auth(), "7719132");
            assert_eq!(
                ConnectorIntegrationV2::get_url(Decidir::new(), &router_data).unwrap(),
                "https://decidir.test/payments/7719132/refunds"
            );
            assert_eq!(request_body(Decidir::new(), &router_data), "{}");

            let result = handle_response(
                Decidir::new(),
                &router_data,
                201,
                r#"{"id": 417921, "amount": 1000, "status": "approved"}"#,
            );
            assert_eq!(result.resource_common_data.status, AttemptStatus::Voided);
        }

        #[test]
        fn partial_refund_sends_amount() {
            let router_data = refund(auth(), "7719132", 500);
            assert_eq!(request_body(Decidir::new(), &router_data), r#"{"amount":500}"#);

            let result = handle_response(
                Decidir::new(),
                &router_data,
                201,
                r#"{"id": 417922, "amount": 500, "status": "approved"}"#,
            );
            let response = result.response.unwrap();
            assert_eq!(response.connector_refund_id, "417922");
            assert_eq!(response.refund_status, RefundStatus::Success);
        }

        #[test]
        fn sync_is_not_offered() {
            let router_data = psync(auth(), "7719132");
            let error =
                ConnectorIntegrationV2::get_url(Decidir::new(), &router_data).unwrap_err();
            assert!(matches!(
                error.current_context(),
                ConnectorError::NotImplemented(_)
            ));
        }
    }

    mod common_tests {
        use super::*;

        #[test]
        fn validation_errors_are_flattened() {
            let error = Decidir::new()
                .build_error_response(
                    http_response(
                        400,
                        r#"{
                            "error_type": "invalid_request_error",
                            "validation_errors": [
                                {"code": "invalid_param", "param": "site_transaction_id"},
                                {"code": "invalid_param", "param": "payment_type"}
                            ]
                        }"#,
                    ),
                    None,
                )
                .unwrap();
            assert_eq!(error.code, "invalid_request_error");
            assert_eq!(
                error.message,
                "invalid_param: site_transaction_id, invalid_param: payment_type"
            );
            assert_eq!(error.status_code, 400);
        }

        #[test]
        fn authentication_error_keeps_message() {
            let error = Decidir::new()
                .build_error_response(
                    http_response(401, r#"{"message": "Invalid authentication credentials"}"#),
                    None,
                )
                .unwrap();
            assert_eq!(error.message, "Invalid authentication credentials");
            assert_eq!(error.status_code, 401);
        }

        #[test]
        fn scrubs_card_cvv_and_api_key() {
            let transcript = "apikey: 566f2c897b5e4bfaa0ec2452f5d67f13\r\n{\"card_data\":{\"card_number\":\"4507990000004905\",\"security_code\":\"123\"},\"amount\":100}";
            let scrubbed = Decidir::new().scrub(transcript);
            assert!(scrubbed.contains("apikey: [FILTERED]"));
            assert!(scrubbed.contains("\"card_number\":\"[FILTERED]"));
            assert!(scrubbed.contains("\"security_code\":\"[FILTERED]"));
            assert!(!scrubbed.contains("4507990000004905"));
            assert!(!scrubbed.contains("566f2c897b5e4bfaa0ec2452f5d67f13"));
        }
    }
}
