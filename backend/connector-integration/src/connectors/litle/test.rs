#[cfg(test)]
mod tests {
    use common_enums::{AttemptStatus, CaptureMethod, RefundStatus, StandardErrorCode};
    use domain_types::{
        connector_types::{PaymentsResponseData, ResponseId},
        errors::ConnectorError,
        router_data::ConnectorAuthType,
    };
    use interfaces::{api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2};

    use common_utils::types::MinorUnit;

    use crate::{
        connectors::{
            litle::transformers::{LitleAuthorization, LitleTxnKind},
            Litle,
        },
        test_utils::*,
    };

    fn auth() -> ConnectorAuthType {
        signature_key("ACTIVE", "MERCHANT", "101")
    }

    fn envelope(transaction: &str) -> String {
        format!(
            "<litleOnlineResponse version='9.4' response='0' message='Valid Format' \
             xmlns='http://www.litle.com/schema'>{transaction}</litleOnlineResponse>"
        )
    }

    fn approved(element: &str) -> String {
        envelope(&format!(
            "<{element} id='pay_1001_1' reportGroup='Default Report Group'>\
             <litleTxnId>100000000000000006</litleTxnId><orderId>order_1001</orderId>\
             <response>000</response><responseTime>2024-05-02T19:43:04</responseTime>\
             <message>Approved</message><authCode>11111 </authCode>\
             <fraudResult><avsResult>01</avsResult><cardValidationResult>M</cardValidationResult></fraudResult>\
             </{element}>"
        ))
    }

    mod authorize_tests {
        use super::*;

        #[test]
        fn sale_carries_card_and_bill_to_address() {
            let body = request_body(Litle::new(), &authorize(auth(), None));

            assert!(body.starts_with(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?><litleOnlineRequest xmlns=\"http://www.litle.com/schema\" version=\"9.4\" merchantId=\"101\">"
            ));
            assert!(body.contains(
                "<authentication><user>ACTIVE</user><password>MERCHANT</password></authentication>"
            ));
            assert!(body.contains(
                "<sale id=\"pay_1001_1\" reportGroup=\"Default Report Group\" customerId=\"cust_42\">"
            ));
            assert!(body.contains(
                "<orderId>order_1001</orderId><amount>1000</amount><orderSource>ecommerce</orderSource>"
            ));
            assert!(body.contains(
                "<billToAddress><name>Jim Smith</name><addressLine1>456 My Street</addressLine1>\
                 <addressLine2>Apt 1</addressLine2><city>Ottawa</city><state>ON</state><zip>K1C2N6</zip>\
                 <country>CA</country><email>jim@example.com</email><phone>5555555555</phone></billToAddress>"
            ));
            assert!(body.contains(&format!(
                "<card><type>VI</type><number>{CARD_NUMBER}</number><expDate>0930</expDate>\
                 <cardValidationNum>{CVC}</cardValidationNum></card>"
            )));
            assert!(!body.contains("<authorization"));
            assert!(body.ends_with("</sale></litleOnlineRequest>"));
        }

        #[test]
        fn manual_capture_is_authorization() {
            let body = request_body(Litle::new(), &authorize(auth(), Some(CaptureMethod::Manual)));
            assert!(body.contains("<authorization id=\"pay_1001_1\""));
            assert!(!body.contains("<sale "));
        }

        #[test]
        fn token_payment_sends_litle_token() {
            let router_data = router_data(
                payment_flow_data(),
                auth(),
                authorize_data(card_token("1111222233334444"), None),
            );
            let body = request_body(Litle::new(), &router_data);
            assert!(body.contains(
                "<token><litleToken>1111222233334444</litleToken><expDate>0930</expDate></token>"
            ));
            assert!(!body.contains("<card>"));
        }

        #[test]
        fn approved_sale_encodes_kind_and_amount() {
            let result = handle_response(Litle::new(), &authorize(auth(), None), 200, &approved("saleResponse"));

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
                        ResponseId::ConnectorTransactionId("100000000000000006;sale;1000".to_string())
                    );
                    assert_eq!(connector_response_reference_id.as_deref(), Some("11111"));
                    assert_eq!(avs_result.and_then(|avs| avs.code).as_deref(), Some("X"));
                    assert_eq!(cvv_result.map(|cvv| cvv.code).as_deref(), Some("M"));
                    assert_eq!(message.as_deref(), Some("Approved"));
                }
                other => panic!("unexpected response {other:?}"),
            }
        }

        #[test]
        fn approved_authorization_is_authorized() {
            let result = handle_response(
                Litle::new(),
                &authorize(auth(), Some(CaptureMethod::Manual)),
                200,
                &approved("authorizationResponse"),
            );
            assert_eq!(result.resource_common_data.status, AttemptStatus::Authorized);
            match result.response {
                Ok(PaymentsResponseData::TransactionResponse { resource_id, .. }) => assert_eq!(
                    resource_id,
                    ResponseId::ConnectorTransactionId(
                        "100000000000000006;authorization;1000".to_string()
                    )
                ),
                other => panic!("unexpected response {other:?}"),
            }
        }

        #[test]
        fn issuer_decline_maps_response_code() {
            let result = handle_response(
                Litle::new(),
                &authorize(auth(), None),
                200,
                &envelope(
                    "<saleResponse id='pay_1001_1' reportGroup='Default Report Group'>\
                     <litleTxnId>600000000000000001</litleTxnId><orderId>order_1001</orderId>\
                     <response>110</response><message>Insufficient Funds</message></saleResponse>",
                ),
            );

            assert_eq!(result.resource_common_data.status, AttemptStatus::Failure);
            let error = result.response.unwrap_err();
            assert_eq!(error.code, "110");
            assert_eq!(error.message, "Insufficient Funds");
            assert_eq!(error.standard_error_code, Some(StandardErrorCode::CardDeclined));
            assert_eq!(error.connector_transaction_id.as_deref(), Some("600000000000000001"));
        }

        #[test]
        fn rejected_envelope_reports_schema_error() {
            let result = handle_response(
                Litle::new(),
                &authorize(auth(), None),
                200,
                "<litleOnlineResponse version='9.4' response='1' \
                 message='Error validating xml data against the schema' \
                 xmlns='http://www.litle.com/schema'/>",
            );
            let error = result.response.unwrap_err();
            assert_eq!(error.code, "1");
            assert_eq!(error.message, "Error validating xml data against the schema");
            assert_eq!(error.standard_error_code, Some(StandardErrorCode::ProcessingError));
        }
    }

    mod follow_up_tests {
        use super::*;

        #[test]
        fn capture_references_litle_txn_id() {
            let router_data = capture(auth(), "100000000000000006;authorization;1000", 750);
            let body = request_body(Litle::new(), &router_data);
            assert!(body.contains(
                "<capture id=\"pay_1001_1\" reportGroup=\"Default Report Group\">\
                 <litleTxnId>100000000000000006</litleTxnId><amount>750</amount></capture>"
            ));

            let result = handle_response(Litle::new(), &router_data, 200, &approved("captureResponse"));
            assert_eq!(result.resource_common_data.status, AttemptStatus::Charged);
            match result.response {
                Ok(PaymentsResponseData::TransactionResponse { resource_id, .. }) => assert_eq!(
                    resource_id,
                    ResponseId::ConnectorTransactionId("100000000000000006;capture;750".to_string())
                ),
                other => panic!("unexpected response {other:?}"),
            }
        }

        #[test]
        fn open_authorization_is_reversed() {
            let router_data = void(auth(), "100000000000000006;authorization;1000");
            let body = request_body(Litle::new(), &router_data);
            assert!(body.contains(
                "<authReversal id=\"pay_1001_1\" reportGroup=\"Default Report Group\">\
                 <litleTxnId>100000000000000006</litleTxnId></authReversal>"
            ));

            let result =
                handle_response(Litle::new(), &router_data, 200, &approved("authReversalResponse"));
            assert_eq!(result.resource_common_data.status, AttemptStatus::Voided);
        }

        #[test]
        fn settled_sale_is_voided() {
            let router_data = void(auth(), "100000000000000006;sale;1000");
            let body = request_body(Litle::new(), &router_data);
            assert!(body.contains("<void id=\"pay_1001_1\""));
            assert!(!body.contains("authReversal"));

            let result = handle_response(Litle::new(), &router_data, 200, &approved("voidResponse"));
            assert_eq!(result.resource_common_data.status, AttemptStatus::Voided);
        }

        #[test]
        fn void_without_matching_answer_fails() {
            let router_data = void(auth(), "100000000000000006;sale;1000");
            let result = handle_response(Litle::new(), &router_data, 200, &approved("saleResponse"));
            assert_eq!(result.resource_common_data.status, AttemptStatus::VoidFailed);
        }

        #[test]
        fn malformed_authorization_is_rejected() {
            let router_data = capture(auth(), "100000000000000006", 750);
            let error =
                ConnectorIntegrationV2::get_request_body(Litle::new(), &router_data).unwrap_err();
            assert!(matches!(
                error.current_context(),
                ConnectorError::InvalidDataFormat { .. }
            ));
        }

        #[test]
        fn authorization_parts_are_read_in_order() {
            let authorization =
                LitleAuthorization::parse("100000000000000006;authorization;1000").unwrap();
            assert_eq!(authorization.litle_txn_id, "100000000000000006");
            assert_eq!(authorization.kind, LitleTxnKind::Authorization);
            assert_eq!(authorization.amount, MinorUnit::new(1000));
            assert_eq!(authorization.encode(), "100000000000000006;authorization;1000");

            for malformed in [
                "100000000000000006;sale",
                "100000000000000006;sale;1000;extra",
                "100000000000000006;refund;1000",
                "100000000000000006;sale;ten",
            ] {
                let error = LitleAuthorization::parse(malformed).unwrap_err();
                assert!(matches!(
                    error.current_context(),
                    ConnectorError::InvalidDataFormat { .. }
                ));
            }
        }

        #[test]
        fn refund_is_credit() {
            let router_data = refund(auth(), "100000000000000006;sale;1000", 500);
            let body = request_body(Litle::new(), &router_data);
            assert!(body.contains(
                "<credit id=\"ref_2001\" reportGroup=\"Default Report Group\">\
                 <litleTxnId>100000000000000006</litleTxnId><amount>500</amount></credit>"
            ));

            let result = handle_response(Litle::new(), &router_data, 200, &approved("creditResponse"));
            let response = result.response.unwrap();
            assert_eq!(response.connector_refund_id, "100000000000000006;credit;500");
            assert_eq!(response.refund_status, RefundStatus::Success);
        }
    }

    mod common_tests {
        use super::*;

        #[test]
        fn unparseable_error_body_is_kept_raw() {
            let error = Litle::new()
                .build_error_response(http_response(503, "Service Unavailable"), None)
                .unwrap();
            assert_eq!(error.code, "503");
            assert_eq!(error.reason.as_deref(), Some("Service Unavailable"));
        }

        #[test]
        fn scrubs_card_cvv_and_password() {
            let transcript = "<password>MERCHANT</password><number>4111111111111111</number>\
                <expDate>0930</expDate><cardValidationNum>123</cardValidationNum>";
            let scrubbed = Litle::new().scrub(transcript);
            assert!(scrubbed.contains("<password>[FILTERED]</password>"));
            assert!(scrubbed.contains("<number>[FILTERED]</number>"));
            assert!(scrubbed.contains("<cardValidationNum>[FILTERED]</cardValidationNum>"));
            assert!(scrubbed.contains("<expDate>0930</expDate>"));
        }

        #[test]
        fn posts_to_online_communicator() {
            let url =
                ConnectorIntegrationV2::get_url(Litle::new(), &authorize(auth(), None)).unwrap();
            assert_eq!(url, "https://litle.test/vap/communicator/online");
        }
    }
}
