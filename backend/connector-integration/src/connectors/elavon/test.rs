#[cfg(test)]
mod tests {
    use common_enums::{AttemptStatus, CaptureMethod, RefundStatus, StandardErrorCode};
    use domain_types::{
        connector_types::{PaymentsResponseData, ResponseId},
        errors::ConnectorError,
        payment_method_data::PaymentMethodData,
        router_data::ConnectorAuthType,
    };
    use interfaces::{api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2};

    use crate::{connectors::Elavon, test_utils::*};

    fn auth() -> ConnectorAuthType {
        signature_key("009005", "devportal1234", "BDDZY5KOUDCNPV4L")
    }

    fn xmldata(body: &str) -> String {
        form_value(body, "xmldata").expect("xmldata field")
    }

    mod authorize_tests {
        use super::*;

        #[test]
        fn sale_request_carries_card_and_billing_fields() {
            let body = request_body(Elavon::new(), &authorize(auth(), None));
            let xml = xmldata(&body);

            assert!(xml.starts_with("<txn>"));
            assert!(xml.contains("<ssl_merchant_id>009005</ssl_merchant_id>"));
            assert!(xml.contains("<ssl_user_id>devportal1234</ssl_user_id>"));
            assert!(xml.contains("<ssl_pin>BDDZY5KOUDCNPV4L</ssl_pin>"));
            assert!(xml.contains("<ssl_transaction_type>ccsale</ssl_transaction_type>"));
            assert!(xml.contains("<ssl_amount>10.00</ssl_amount>"));
            assert!(xml.contains("<ssl_transaction_currency>USD</ssl_transaction_currency>"));
            assert!(xml.contains(&format!("<ssl_card_number>{CARD_NUMBER}</ssl_card_number>")));
            assert!(xml.contains("<ssl_exp_date>0930</ssl_exp_date>"));
            assert!(xml.contains("<ssl_cvv2cvc2_indicator>1</ssl_cvv2cvc2_indicator>"));
            assert!(xml.contains(&format!("<ssl_cvv2cvc2>{CVC}</ssl_cvv2cvc2>")));
            assert!(xml.contains("<ssl_first_name>Longbob</ssl_first_name>"));
            assert!(xml.contains("<ssl_last_name>Longsen</ssl_last_name>"));
            assert!(xml.contains("<ssl_avs_address>456 My Street</ssl_avs_address>"));
            assert!(xml.contains("<ssl_address2>Apt 1</ssl_address2>"));
            assert!(xml.contains("<ssl_city>Ottawa</ssl_city>"));
            assert!(xml.contains("<ssl_state>ON</ssl_state>"));
            assert!(xml.contains("<ssl_avs_zip>K1C2N6</ssl_avs_zip>"));
            assert!(xml.contains("<ssl_country>CAN</ssl_country>"));
            assert!(xml.contains("<ssl_phone>5555555555</ssl_phone>"));
            assert!(xml.contains("<ssl_email>jim@example.com</ssl_email>"));
            assert!(xml.contains("<ssl_cardholder_ip>127.0.0.1</ssl_cardholder_ip>"));
            assert!(xml.contains("<ssl_description>Store purchase</ssl_description>"));
            assert!(xml.contains("<ssl_invoice_number>order_1001</ssl_invoice_number>"));
            assert!(xml.contains("<ssl_customer_code>cust_42</ssl_customer_code>"));
            assert!(!xml.contains("<ssl_token>"));
        }

        #[test]
        fn manual_capture_sends_auth_only() {
            let body = request_body(
                Elavon::new(),
                &authorize(auth(), Some(CaptureMethod::Manual)),
            );
            assert!(xmldata(&body)
                .contains("<ssl_transaction_type>ccauthonly</ssl_transaction_type>"));
        }

        #[test]
        fn stored_token_replaces_card_number() {
            let router_data = router_data(
                payment_flow_data(),
                auth(),
                authorize_data(card_token("4421912014039990"), None),
            );
            let xml = xmldata(&request_body(Elavon::new(), &router_data));
            assert!(xml.contains("<ssl_token>4421912014039990</ssl_token>"));
            assert!(!xml.contains("<ssl_card_number>"));
            assert!(!xml.contains("<ssl_cvv2cvc2>"));
        }

        #[test]
        fn long_names_are_truncated() {
            let mut router_data = authorize(auth(), None);
            if let PaymentMethodData::Card(card) = &mut router_data.request.payment_method_data {
                card.card_holder_name = Some(secret("Bartholomew-Maximilian-Jonathan Smith"));
            }
            let xml = xmldata(&request_body(Elavon::new(), &router_data));
            assert!(xml.contains("<ssl_first_name>Bartholomew-Maximili</ssl_first_name>"));
        }

        #[test]
        fn scheduled_capture_is_not_supported() {
            let router_data = authorize(auth(), Some(CaptureMethod::Scheduled));
            let error = ConnectorIntegrationV2::get_request_body(Elavon::new(), &router_data)
                .unwrap_err();
            assert!(matches!(
                error.current_context(),
                ConnectorError::FlowNotSupported { .. }
            ));
        }

        #[test]
        fn wrong_auth_type_is_rejected() {
            let router_data = authorize(header_key("only_one_key"), None);
            let error = ConnectorIntegrationV2::get_request_body(Elavon::new(), &router_data)
                .unwrap_err();
            assert_eq!(
                *error.current_context(),
                ConnectorError::FailedToObtainAuthType
            );
        }

        #[test]
        fn approval_is_charged_with_avs_and_cvv() {
            let router_data = authorize(auth(), None);
            let result = handle_response(
                Elavon::new(),
                &router_data,
                200,
                r#"<?xml version="1.0" encoding="UTF-8"?>
                <txn>
                    <ssl_result>0</ssl_result>
                    <ssl_result_message>APPROVAL</ssl_result_message>
                    <ssl_txn_id>010520ED3-F72F-4AB2-9B2A-3C0B3CA2AB53</ssl_txn_id>
                    <ssl_approval_code>CVI877</ssl_approval_code>
                    <ssl_avs_response>Y</ssl_avs_response>
                    <ssl_cvv2_response>M</ssl_cvv2_response>
                    <ssl_transaction_type>SALE</ssl_transaction_type>
                    <ssl_amount>10.00</ssl_amount>
                </txn>"#,
            );

            assert_eq!(result.resource_common_data.status, AttemptStatus::Charged);
            match result.response {
                Ok(PaymentsResponseData::TransactionResponse {
                    resource_id,
                    connector_response_reference_id,
                    avs_result,
                    cvv_result,
                    message,
                    ..
                }) => {
                    assert_eq!(
                        resource_id,
                        ResponseId::ConnectorTransactionId(
                            "010520ED3-F72F-4AB2-9B2A-3C0B3CA2AB53".to_string()
                        )
                    );
                    assert_eq!(connector_response_reference_id.as_deref(), Some("CVI877"));
                    assert_eq!(avs_result.and_then(|avs| avs.code).as_deref(), Some("Y"));
                    assert_eq!(cvv_result.map(|cvv| cvv.code).as_deref(), Some("M"));
                    assert_eq!(message.as_deref(), Some("APPROVAL"));
                }
                other => panic!("expected transaction response, got {other:?}"),
            }
        }

        #[test]
        fn auth_only_approval_is_authorized() {
            let router_data = authorize(auth(), Some(CaptureMethod::Manual));
            let result = handle_response(
                Elavon::new(),
                &router_data,
                200,
                "<txn><ssl_result>0</ssl_result><ssl_result_message>APPROVAL</ssl_result_message>\
                 <ssl_txn_id>AA49315-1</ssl_txn_id><ssl_transaction_type>AUTHONLY</ssl_transaction_type></txn>",
            );
            assert_eq!(result.resource_common_data.status, AttemptStatus::Authorized);
        }

        #[test]
        fn decline_maps_to_card_declined() {
            let router_data = authorize(auth(), None);
            let result = handle_response(
                Elavon::new(),
                &router_data,
                200,
                "<txn><ssl_result>1</ssl_result><ssl_result_message>DECLINED</ssl_result_message>\
                 <ssl_txn_id>AA49315-2</ssl_txn_id><ssl_avs_response>N</ssl_avs_response></txn>",
            );

            assert_eq!(result.resource_common_data.status, AttemptStatus::Failure);
            let error = result.response.unwrap_err();
            assert_eq!(error.code, "1");
            assert_eq!(error.message, "DECLINED");
            assert_eq!(error.attempt_status, Some(AttemptStatus::Failure));
            assert_eq!(error.standard_error_code, Some(StandardErrorCode::CardDeclined));
            assert_eq!(error.connector_transaction_id.as_deref(), Some("AA49315-2"));
        }

        #[test]
        fn gateway_error_code_maps_to_invalid_number() {
            let router_data = authorize(auth(), None);
            let result = handle_response(
                Elavon::new(),
                &router_data,
                200,
                "<txn><errorCode>5000</errorCode><errorName>Credit Card Number Invalid</errorName>\
                 <errorMessage>The Credit Card Number supplied in the authorization request appears to be invalid.</errorMessage></txn>",
            );

            let error = result.response.unwrap_err();
            assert_eq!(error.code, "5000");
            assert_eq!(error.reason.as_deref(), Some("Credit Card Number Invalid"));
            assert_eq!(error.standard_error_code, Some(StandardErrorCode::InvalidNumber));
        }

        #[test]
        fn non_xml_answer_is_a_deserialization_error() {
            let router_data = authorize(auth(), None);
            let error = Elavon::new()
                .handle_response_v2(&router_data, None, http_response(200, "not xml"))
                .unwrap_err();
            assert_eq!(
                *error.current_context(),
                ConnectorError::ResponseDeserializationFailed
            );
        }
    }

    mod follow_up_tests {
        use super::*;

        const AUTHORIZATION: &str = "010520ED3-F72F-4AB2-9B2A-3C0B3CA2AB53";

        #[test]
        fn capture_completes_the_authorization() {
            let xml = xmldata(&request_body(
                Elavon::new(),
                &capture(auth(), AUTHORIZATION, 750),
            ));
            assert!(xml.contains("<ssl_transaction_type>cccomplete</ssl_transaction_type>"));
            assert!(xml.contains(&format!("<ssl_txn_id>{AUTHORIZATION}</ssl_txn_id>")));
            assert!(xml.contains("<ssl_amount>7.50</ssl_amount>"));
            assert!(!xml.contains("<ssl_card_number>"));
        }

        #[test]
        fn void_and_refund_reference_the_transaction() {
            let void_xml = xmldata(&request_body(Elavon::new(), &void(auth(), AUTHORIZATION)));
            assert!(void_xml.contains("<ssl_transaction_type>ccvoid</ssl_transaction_type>"));
            assert!(!void_xml.contains("<ssl_amount>"));

            let refund_xml = xmldata(&request_body(
                Elavon::new(),
                &refund(auth(), AUTHORIZATION, 500),
            ));
            assert!(refund_xml.contains("<ssl_transaction_type>ccreturn</ssl_transaction_type>"));
            assert!(refund_xml.contains("<ssl_amount>5.00</ssl_amount>"));
        }

        #[test]
        fn failed_void_is_void_failed() {
            let router_data = void(auth(), AUTHORIZATION);
            let result = handle_response(
                Elavon::new(),
                &router_data,
                200,
                "<txn><errorCode>5040</errorCode><errorName>Invalid Transaction ID</errorName>\
                 <errorMessage>The transaction ID is invalid for this transaction type</errorMessage></txn>",
            );
            assert_eq!(result.resource_common_data.status, AttemptStatus::VoidFailed);
            assert_eq!(result.response.unwrap_err().code, "5040");
        }

        #[test]
        fn refund_approval_is_success() {
            let router_data = refund(auth(), AUTHORIZATION, 500);
            let result = handle_response(
                Elavon::new(),
                &router_data,
                200,
                "<txn><ssl_result>0</ssl_result><ssl_result_message>APPROVAL</ssl_result_message>\
                 <ssl_txn_id>REFUND-42</ssl_txn_id><ssl_transaction_type>RETURN</ssl_transaction_type></txn>",
            );
            let refund = result.response.unwrap();
            assert_eq!(refund.connector_refund_id, "REFUND-42");
            assert_eq!(refund.refund_status, RefundStatus::Success);
            assert_eq!(result.resource_common_data.status, RefundStatus::Success);
        }

        #[test]
        fn txnquery_maps_settlement_state() {
            let psync_xml = xmldata(&request_body(Elavon::new(), &psync(auth(), AUTHORIZATION)));
            assert!(psync_xml.contains("<ssl_transaction_type>txnquery</ssl_transaction_type>"));

            let router_data = psync(auth(), AUTHORIZATION);
            let settled = handle_response(
                Elavon::new(),
                &router_data,
                200,
                "<txn><ssl_txn_id>010520ED3-F72F-4AB2-9B2A-3C0B3CA2AB53</ssl_txn_id>\
                 <ssl_trans_status>STL</ssl_trans_status><ssl_transaction_type>SALE</ssl_transaction_type></txn>",
            );
            assert_eq!(settled.resource_common_data.status, AttemptStatus::Charged);

            let open_auth = handle_response(
                Elavon::new(),
                &router_data,
                200,
                "<txn><ssl_txn_id>010520ED3-F72F-4AB2-9B2A-3C0B3CA2AB53</ssl_txn_id>\
                 <ssl_trans_status>PEN</ssl_trans_status><ssl_transaction_type>AUTHONLY</ssl_transaction_type></txn>",
            );
            assert_eq!(open_auth.resource_common_data.status, AttemptStatus::Authorized);
        }

        #[test]
        fn refund_query_reads_trans_status() {
            let router_data = rsync(auth(), AUTHORIZATION, "REFUND-42");
            let xml = xmldata(&request_body(Elavon::new(), &router_data));
            assert!(xml.contains("<ssl_txn_id>REFUND-42</ssl_txn_id>"));

            let result = handle_response(
                Elavon::new(),
                &router_data,
                200,
                "<txn><ssl_txn_id>REFUND-42</ssl_txn_id><ssl_trans_status>PEN</ssl_trans_status></txn>",
            );
            assert_eq!(result.response.unwrap().refund_status, RefundStatus::Success);
        }
    }

    mod common_tests {
        use super::*;

        #[test]
        fn error_document_is_parsed() {
            let error = Elavon::new()
                .build_error_response(
                    http_response(
                        400,
                        "<txn><errorCode>4025</errorCode><errorName>Invalid Credentials</errorName>\
                         <errorMessage>The credentials supplied in the authorization request are invalid.</errorMessage></txn>",
                    ),
                    None,
                )
                .unwrap();
            assert_eq!(error.code, "4025");
            assert_eq!(error.status_code, 400);
            assert!(error.raw_connector_response.is_some());
        }

        #[test]
        fn unparsable_error_keeps_raw_body() {
            let error = Elavon::new()
                .build_error_response(http_response(503, "Service Unavailable"), None)
                .unwrap();
            assert_eq!(error.code, "503");
            assert_eq!(error.reason.as_deref(), Some("Service Unavailable"));
        }

        #[test]
        fn scrubs_card_cvv_and_pin() {
            let connector = Elavon::new();
            assert!(connector.supports_scrubbing());

            let raw = "<txn><ssl_pin>BDDZY5KOUDCNPV4L</ssl_pin><ssl_card_number>4111111111111111</ssl_card_number>\
                       <ssl_cvv2cvc2_indicator>1</ssl_cvv2cvc2_indicator><ssl_cvv2cvc2>123</ssl_cvv2cvc2></txn>";
            let scrubbed = connector.scrub(raw);
            assert!(!scrubbed.contains("4111111111111111"));
            assert!(!scrubbed.contains("BDDZY5KOUDCNPV4L"));
            assert!(scrubbed.contains("<ssl_cvv2cvc2>[FILTERED]</ssl_cvv2cvc2>"));
            assert!(scrubbed.contains("<ssl_cvv2cvc2_indicator>1</ssl_cvv2cvc2_indicator>"));

            let encoded = "xmldata=%3Ctxn%3E%3Cssl_card_number%3E4111111111111111%3C%2Fssl_card_number%3E\
                           %3Cssl_cvv2cvc2%3E123%3C%2Fssl_cvv2cvc2%3E%3C%2Ftxn%3E";
            let scrubbed = connector.scrub(encoded);
            assert!(!scrubbed.contains("4111111111111111"));
            assert!(scrubbed.contains("%3Cssl_cvv2cvc2%3E[FILTERED]%3C%2Fssl_cvv2cvc2%3E"));
        }

        #[test]
        fn posts_to_processxml() {
            let router_data = authorize(auth(), None);
            let url = ConnectorIntegrationV2::get_url(Elavon::new(), &router_data).unwrap();
            assert_eq!(url, "https://elavon.test/processxml.do");
        }
    }
}
