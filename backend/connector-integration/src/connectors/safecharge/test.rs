#[cfg(test)]
mod tests {
    use common_enums::{AttemptStatus, CaptureMethod, RefundStatus, StandardErrorCode};
    use domain_types::{
        connector_types::{PaymentsResponseData, ResponseId},
        errors::ConnectorError,
        router_data::ConnectorAuthType,
    };
    use interfaces::{api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2};

    use crate::{connectors::Safecharge, test_utils::*};

    const AUTHORIZATION: &str = "order_1001|101510108310|111577|ZQBpAFAA|09|30|10.00|USD";

    fn auth() -> ConnectorAuthType {
        body_key("SpreedlyTestTRX", "5Sp9BYfv7")
    }

    fn approved(transaction_id: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?><Response>\
             <Version>4.1.0</Version><ClientLoginID>SpreedlyTestTRX</ClientLoginID>\
             <ClientUniqueID>order_1001</ClientUniqueID><TransactionID>{transaction_id}</TransactionID>\
             <Status>APPROVED</Status><AuthCode>111577</AuthCode><AVSCode>V</AVSCode>\
             <CVV2Reply>M</CVV2Reply><ReasonCodes/><ErrCode>0</ErrCode><ExErrCode>0</ExErrCode>\
             <Token>ZQBpAFAA</Token></Response>"
        )
    }

    mod authorize_tests {
        use super::*;

        #[test]
        fn sale_posts_card_and_billing_fields() {
            let body = request_body(Safecharge::new(), &authorize(auth(), None));
            let field = |key: &str| form_value(&body, key);

            assert_eq!(field("sg_TransType").as_deref(), Some("Sale"));
            assert_eq!(field("sg_ClientLoginID").as_deref(), Some("SpreedlyTestTRX"));
            assert_eq!(field("sg_ClientPassword").as_deref(), Some("5Sp9BYfv7"));
            assert_eq!(field("sg_ResponseFormat").as_deref(), Some("4"));
            assert_eq!(field("sg_Version").as_deref(), Some("4.1.0"));
            assert_eq!(field("sg_Amount").as_deref(), Some("10.00"));
            assert_eq!(field("sg_Currency").as_deref(), Some("USD"));
            assert_eq!(field("sg_ClientUniqueID").as_deref(), Some("order_1001"));
            assert_eq!(field("sg_NameOnCard").as_deref(), Some("Longbob Longsen"));
            assert_eq!(field("sg_CardNumber").as_deref(), Some(CARD_NUMBER));
            assert_eq!(field("sg_ExpMonth").as_deref(), Some("09"));
            assert_eq!(field("sg_ExpYear").as_deref(), Some("30"));
            assert_eq!(field("sg_CVV2").as_deref(), Some(CVC));
            assert_eq!(field("sg_FirstName").as_deref(), Some("Jim"));
            assert_eq!(field("sg_LastName").as_deref(), Some("Smith"));
            assert_eq!(field("sg_Address").as_deref(), Some("456 My Street Apt 1"));
            assert_eq!(field("sg_City").as_deref(), Some("Ottawa"));
            assert_eq!(field("sg_Zip").as_deref(), Some("K1C2N6"));
            assert_eq!(field("sg_Country").as_deref(), Some("CA"));
            assert_eq!(field("sg_Email").as_deref(), Some("jim@example.com"));
            assert_eq!(field("sg_IPAddress").as_deref(), Some("127.0.0.1"));
            assert_eq!(field("sg_TransactionID"), None);
            assert_eq!(field("sg_CreditType"), None);
        }

        #[test]
        fn manual_capture_is_auth() {
            let body = request_body(
                Safecharge::new(),
                &authorize(auth(), Some(CaptureMethod::Manual)),
            );
            assert_eq!(form_value(&body, "sg_TransType").as_deref(), Some("Auth"));
        }

        #[test]
        fn token_payment_sends_cc_token() {
            let router_data = router_data(
                payment_flow_data(),
                auth(),
                authorize_data(card_token("ZQBpAFAA"), None),
            );
            let body = request_body(Safecharge::new(), &router_data);
            assert_eq!(form_value(&body, "sg_CCToken").as_deref(), Some("ZQBpAFAA"));
            assert_eq!(form_value(&body, "sg_ExpMonth").as_deref(), Some("09"));
            assert_eq!(form_value(&body, "sg_ExpYear").as_deref(), Some("30"));
            assert_eq!(form_value(&body, "sg_CardNumber"), None);
        }

        #[test]
        fn approved_sale_keeps_follow_up_context() {
            let result = handle_response(
                Safecharge::new(),
                &authorize(auth(), None),
                200,
                &approved("101510108310"),
            );

            assert_eq!(result.resource_common_data.status, AttemptStatus::Charged);
            match result.response {
                Ok(PaymentsResponseData::TransactionResponse {
                    resource_id,
                    connector_response_reference_id,
                    avs_result,
                    cvv_result,
                    ..
                }) => {
                    assert_eq!(
                        resource_id,
                        ResponseId::ConnectorTransactionId(AUTHORIZATION.to_string())
                    );
                    assert_eq!(connector_response_reference_id.as_deref(), Some("111577"));
                    assert_eq!(avs_result.and_then(|avs| avs.code).as_deref(), Some("V"));
                    assert_eq!(cvv_result.map(|cvv| cvv.code).as_deref(), Some("M"));
                }
                other => panic!("unexpected response {other:?}"),
            }
        }

        #[test]
        fn decline_uses_generic_code_when_extended_is_zero() {
            let result = handle_response(
                Safecharge::new(),
                &authorize(auth(), None),
                200,
                "<Response><ClientUniqueID>order_1001</ClientUniqueID>\
                 <TransactionID>101510108311</TransactionID><Status>DECLINED</Status>\
                 <AuthCode/><ErrCode>-1</ErrCode><ExErrCode>0</ExErrCode>\
                 <Reason>Decline</Reason></Response>",
            );

            assert_eq!(result.resource_common_data.status, AttemptStatus::Failure);
            let error = result.response.unwrap_err();
            assert_eq!(error.code, "-1");
            assert_eq!(error.message, "Decline");
            assert_eq!(error.standard_error_code, Some(StandardErrorCode::CardDeclined));
            assert_eq!(error.connector_transaction_id.as_deref(), Some("101510108311"));
        }

        #[test]
        fn gateway_error_reports_extended_code() {
            let result = handle_response(
                Safecharge::new(),
                &authorize(auth(), None),
                200,
                "<Response><Status>ERROR</Status><ErrCode>-1100</ErrCode>\
                 <ExErrCode>1001</ExErrCode><Reason>Invalid Expiration Date</Reason></Response>",
            );

            assert_eq!(result.resource_common_data.status, AttemptStatus::Failure);
            let error = result.response.unwrap_err();
            assert_eq!(error.code, "1001");
            assert_eq!(error.message, "Invalid Expiration Date");
            assert_eq!(error.standard_error_code, Some(StandardErrorCode::InvalidExpiryDate));
        }
    }

    mod follow_up_tests {
        use super::*;

        #[test]
        fn settle_references_original_transaction() {
            let router_data = capture(auth(), AUTHORIZATION, 750);
            let body = request_body(Safecharge::new(), &router_data);
            let field = |key: &str| form_value(&body, key);

            assert_eq!(field("sg_TransType").as_deref(), Some("Settle"));
            assert_eq!(field("sg_Amount").as_deref(), Some("7.50"));
            assert_eq!(field("sg_TransactionID").as_deref(), Some("101510108310"));
            assert_eq!(field("sg_AuthCode").as_deref(), Some("111577"));
            assert_eq!(field("sg_CCToken").as_deref(), Some("ZQBpAFAA"));
            assert_eq!(field("sg_ExpMonth").as_deref(), Some("09"));
            assert_eq!(field("sg_ClientUniqueID").as_deref(), Some("order_1001"));
            assert_eq!(field("sg_CardNumber"), None);

            let result =
                handle_response(Safecharge::new(), &router_data, 200, &approved("101510108320"));
            assert_eq!(result.resource_common_data.status, AttemptStatus::Charged);
            match result.response {
                Ok(PaymentsResponseData::TransactionResponse { resource_id, .. }) => assert_eq!(
                    resource_id,
                    ResponseId::ConnectorTransactionId(
                        "order_1001|101510108320|111577|ZQBpAFAA|09|30|7.50|USD".to_string()
                    )
                ),
                other => panic!("unexpected response {other:?}"),
            }
        }

        #[test]
        fn void_echoes_authorized_amount() {
            let router_data = void(auth(), AUTHORIZATION);
            let body = request_body(Safecharge::new(), &router_data);
            assert_eq!(form_value(&body, "sg_TransType").as_deref(), Some("Void"));
            assert_eq!(form_value(&body, "sg_Amount").as_deref(), Some("10.00"));
            assert_eq!(form_value(&body, "sg_Currency").as_deref(), Some("USD"));
            assert_eq!(
                form_value(&body, "sg_TransactionID").as_deref(),
                Some("101510108310")
            );

            let result =
                handle_response(Safecharge::new(), &router_data, 200, &approved("101510108330"));
            assert_eq!(result.resource_common_data.status, AttemptStatus::Voided);
        }

        #[test]
        fn failed_void_is_void_failed() {
            let result = handle_response(
                Safecharge::new(),
                &void(auth(), AUTHORIZATION),
                200,
                "<Response><Status>ERROR</Status><ErrCode>-1100</ErrCode>\
                 <ExErrCode>1105</ExErrCode><Reason>Transaction already voided</Reason></Response>",
            );
            assert_eq!(result.resource_common_data.status, AttemptStatus::VoidFailed);
            assert_eq!(
                result.response.unwrap_err().standard_error_code,
                Some(StandardErrorCode::ProcessingError)
            );
        }

        #[test]
        fn refund_is_credit_of_type_two() {
            let router_data = refund(auth(), AUTHORIZATION, 500);
            let body = request_body(Safecharge::new(), &router_data);
            let field = |key: &str| form_value(&body, key);

            assert_eq!(field("sg_TransType").as_deref(), Some("Credit"));
            assert_eq!(field("sg_CreditType").as_deref(), Some("2"));
            assert_eq!(field("sg_Amount").as_deref(), Some("5.00"));
            assert_eq!(field("sg_ClientUniqueID").as_deref(), Some("ref_2001"));
            assert_eq!(field("sg_TransactionID").as_deref(), Some("101510108310"));

            let result =
                handle_response(Safecharge::new(), &router_data, 200, &approved("101510108340"));
            let response = result.response.unwrap();
            assert_eq!(response.connector_refund_id, "101510108340");
            assert_eq!(response.refund_status, RefundStatus::Success);
        }

        #[test]
        fn malformed_authorization_is_rejected() {
            let router_data = refund(auth(), "101510108310", 500);
            let error = ConnectorIntegrationV2::get_request_body(Safecharge::new(), &router_data)
                .unwrap_err();
            assert!(matches!(
                error.current_context(),
                ConnectorError::InvalidDataFormat { .. }
            ));
        }
    }

    mod common_tests {
        use super::*;

        #[test]
        fn unparseable_error_body_is_kept_raw() {
            let error = Safecharge::new()
                .build_error_response(http_response(500, "Server Error"), None)
                .unwrap();
            assert_eq!(error.code, "500");
            assert_eq!(error.message, "SafeCharge error response");
            assert_eq!(error.reason.as_deref(), Some("Server Error"));
        }

        #[test]
        fn scrubs_card_cvv_and_password() {
            let transcript = "sg_ClientLoginID=SpreedlyTestTRX&sg_ClientPassword=5Sp9BYfv7\
                &sg_CardNumber=4111111111111111&sg_ExpMonth=09&sg_CVV2=123";
            let scrubbed = Safecharge::new().scrub(transcript);
            assert!(scrubbed.contains("sg_ClientPassword=[FILTERED]"));
            assert!(scrubbed.contains("sg_CardNumber=[FILTERED]"));
            assert!(scrubbed.contains("sg_CVV2=[FILTERED]"));
            assert!(scrubbed.contains("sg_ExpMonth=09"));
            assert!(scrubbed.contains("sg_ClientLoginID=SpreedlyTestTRX"));
        }

        #[test]
        fn posts_form_to_process_endpoint() {
            let router_data = authorize(auth(), None);
            let url = ConnectorIntegrationV2::get_url(Safecharge::new(), &router_data).unwrap();
            assert_eq!(url, "https://safecharge.test/service.asmx/Process");
            let headers =
                ConnectorIntegrationV2::get_headers(Safecharge::new(), &router_data).unwrap();
            assert!(headers
                .iter()
                .any(|(name, _)| name == "Content-Type"));
        }
    }
}
