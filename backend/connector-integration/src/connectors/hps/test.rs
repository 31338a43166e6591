#[cfg(test)]
mod tests {
    use common_enums::{AttemptStatus, CaptureMethod, RefundStatus, StandardErrorCode};
    use domain_types::{
        connector_types::{PaymentsResponseData, ResponseId},
        router_data::ConnectorAuthType,
    };
    use interfaces::{api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2};

    use crate::{connectors::Hps, test_utils::*};

    fn auth() -> ConnectorAuthType {
        header_key("skapi_cert_MYl2AQAowiQAbLp5JesGKh7QFkcizOP2jcX9BrEMqQ")
    }

    fn envelope(ver: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
             <soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
             <soap:Body><PosResponse rootUrl=\"https://posgateway.cert.secureexchange.net\" xmlns=\"http://Hps.Exchange.PosGateway\">\
             <Ver1.0>{ver}</Ver1.0></PosResponse></soap:Body></soap:Envelope>"
        )
    }

    fn approved_sale() -> String {
        envelope(
            "<Header><LicenseId>95878</LicenseId><GatewayTxnId>1035967766</GatewayTxnId>\
             <GatewayRspCode>0</GatewayRspCode><GatewayRspMsg>Success</GatewayRspMsg></Header>\
             <Transaction><CreditSale><RspCode>00</RspCode><RspText>APPROVAL</RspText>\
             <AuthCode>43204A</AuthCode><AVSRsltCode>Y</AVSRsltCode><CVVRsltCode>M</CVVRsltCode>\
             <RefNbr>009215381133</RefNbr><CardType>Visa</CardType></CreditSale></Transaction>",
        )
    }

    mod authorize_tests {
        use super::*;

        #[test]
        fn sale_is_wrapped_in_pos_request_envelope() {
            let body = request_body(Hps::new(), &authorize(auth(), None));

            assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?><soap:Envelope"));
            assert!(body.contains("<PosRequest xmlns=\"http://Hps.Exchange.PosGateway\"><Ver1.0><Header>"));
            assert!(body.contains(
                "<SecretAPIKey>skapi_cert_MYl2AQAowiQAbLp5JesGKh7QFkcizOP2jcX9BrEMqQ</SecretAPIKey>"
            ));
            assert!(body.contains("<Transaction><CreditSale><Block1><AllowDup>Y</AllowDup><Amt>10.00</Amt>"));
            assert!(body.contains("<CardHolderFirstName>Jim</CardHolderFirstName>"));
            assert!(body.contains("<CardHolderAddr>456 My Street Apt 1</CardHolderAddr>"));
            assert!(body.contains("<CardHolderZip>K1C2N6</CardHolderZip>"));
            assert!(body.contains("<InvoiceNbr>order_1001</InvoiceNbr>"));
            assert!(body.contains(&format!(
                "<ManualEntry><CardNbr>{CARD_NUMBER}</CardNbr><ExpMonth>09</ExpMonth><ExpYear>2030</ExpYear><CVV2>{CVC}</CVV2>"
            )));
            assert!(body.contains("<TokenRequest>N</TokenRequest>"));
            assert!(body.ends_with("</soap:Envelope>"));
        }

        #[test]
        fn manual_capture_is_credit_auth() {
            let body = request_body(Hps::new(), &authorize(auth(), Some(CaptureMethod::Manual)));
            assert!(body.contains("<CreditAuth><Block1>"));
            assert!(!body.contains("<CreditSale>"));
        }

        #[test]
        fn token_payment_sends_token_data() {
            let router_data = router_data(
                payment_flow_data(),
                auth(),
                authorize_data(card_token("supt_8f8e0b5b"), None),
            );
            let body = request_body(Hps::new(), &router_data);
            assert!(body.contains("<TokenData><TokenValue>supt_8f8e0b5b</TokenValue>"));
            assert!(!body.contains("<ManualEntry>"));
        }

        #[test]
        fn approved_sale_uses_gateway_txn_id() {
            let result = handle_response(Hps::new(), &authorize(auth(), None), 200, &approved_sale());

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
                        ResponseId::ConnectorTransactionId("1035967766".to_string())
                    );
                    assert_eq!(connector_response_reference_id.as_deref(), Some("43204A"));
                    assert_eq!(avs_result.and_then(|avs| avs.code).as_deref(), Some("Y"));
                    assert_eq!(cvv_result.map(|cvv| cvv.code).as_deref(), Some("M"));
                    assert_eq!(message.as_deref(), Some("APPROVAL"));
                }
                other => panic!("unexpected response {other:?}"),
            }
        }

        #[test]
        fn issuer_decline_is_a_failure() {
            let result = handle_response(
                Hps::new(),
                &authorize(auth(), None),
                200,
                &envelope(
                    "<Header><GatewayTxnId>1035967767</GatewayTxnId><GatewayRspCode>0</GatewayRspCode>\
                     <GatewayRspMsg>Success</GatewayRspMsg></Header>\
                     <Transaction><CreditSale><RspCode>05</RspCode><RspText>DECLINE</RspText></CreditSale></Transaction>",
                ),
            );

            assert_eq!(result.resource_common_data.status, AttemptStatus::Failure);
            let error = result.response.unwrap_err();
            assert_eq!(error.code, "05");
            assert_eq!(error.message, "DECLINE");
            assert_eq!(error.standard_error_code, Some(StandardErrorCode::CardDeclined));
            assert_eq!(error.connector_transaction_id.as_deref(), Some("1035967767"));
        }

        #[test]
        fn gateway_error_wins_over_missing_issuer_result() {
            let result = handle_response(
                Hps::new(),
                &authorize(auth(), None),
                200,
                &envelope(
                    "<Header><GatewayRspCode>-2</GatewayRspCode>\
                     <GatewayRspMsg>Authentication Error</GatewayRspMsg></Header>",
                ),
            );
            let error = result.response.unwrap_err();
            assert_eq!(error.code, "-2");
            assert_eq!(error.message, "Authentication Error");
            assert_eq!(error.standard_error_code, Some(StandardErrorCode::ConfigError));
        }
    }

    mod follow_up_tests {
        use super::*;

        fn empty_service(service: &str) -> String {
            envelope(&format!(
                "<Header><GatewayTxnId>1035967800</GatewayTxnId><GatewayRspCode>0</GatewayRspCode>\
                 <GatewayRspMsg>Success</GatewayRspMsg></Header><Transaction><{service} /></Transaction>"
            ))
        }

        #[test]
        fn capture_adds_to_batch() {
            let router_data = capture(auth(), "1035967766", 750);
            let body = request_body(Hps::new(), &router_data);
            assert!(body.contains(
                "<CreditAddToBatch><GatewayTxnId>1035967766</GatewayTxnId><Amt>7.50</Amt></CreditAddToBatch>"
            ));

            let result =
                handle_response(Hps::new(), &router_data, 200, &empty_service("CreditAddToBatch"));
            assert_eq!(result.resource_common_data.status, AttemptStatus::Charged);
        }

        #[test]
        fn void_sends_credit_void() {
            let router_data = void(auth(), "1035967766");
            let body = request_body(Hps::new(), &router_data);
            assert!(body.contains("<CreditVoid><GatewayTxnId>1035967766</GatewayTxnId></CreditVoid>"));

            let result = handle_response(Hps::new(), &router_data, 200, &empty_service("CreditVoid"));
            assert_eq!(result.resource_common_data.status, AttemptStatus::Voided);
        }

        #[test]
        fn refund_sends_credit_return() {
            let router_data = refund(auth(), "1035967766", 500);
            let body = request_body(Hps::new(), &router_data);
            assert!(body.contains(
                "<CreditReturn><Block1><AllowDup>Y</AllowDup><Amt>5.00</Amt><GatewayTxnId>1035967766</GatewayTxnId></Block1></CreditReturn>"
            ));

            let result =
                handle_response(Hps::new(), &router_data, 200, &empty_service("CreditReturn"));
            let response = result.response.unwrap();
            assert_eq!(response.connector_refund_id, "1035967800");
            assert_eq!(response.refund_status, RefundStatus::Success);
        }
    }

    mod common_tests {
        use super::*;

        #[test]
        fn soap_fault_is_reported() {
            let fault = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
                <soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\"><soap:Body>\
                <soap:Fault><faultcode>soap:Client</faultcode>\
                <faultstring>Server was unable to read request.</faultstring></soap:Fault>\
                </soap:Body></soap:Envelope>";
            let error = Hps::new()
                .build_error_response(http_response(500, fault), None)
                .unwrap();
            assert_eq!(error.code, "soap:Client");
            assert_eq!(error.message, "Server was unable to read request.");
            assert_eq!(error.status_code, 500);
        }

        #[test]
        fn scrubs_card_cvv_and_key() {
            let transcript = "<SecretAPIKey>skapi_cert_abc</SecretAPIKey><CardNbr>4111111111111111</CardNbr><ExpMonth>09</ExpMonth><CVV2>123</CVV2>";
            let scrubbed = Hps::new().scrub(transcript);
            assert!(scrubbed.contains("<SecretAPIKey>[FILTERED]</SecretAPIKey>"));
            assert!(scrubbed.contains("<CardNbr>[FILTERED]</CardNbr>"));
            assert!(scrubbed.contains("<CVV2>[FILTERED]</CVV2>"));
            assert!(scrubbed.contains("<ExpMonth>09</ExpMonth>"));
        }

        #[test]
        fn posts_to_pos_gateway_service() {
            let url = ConnectorIntegrationV2::get_url(Hps::new(), &authorize(auth(), None)).unwrap();
            assert_eq!(
                url,
                "https://hps.test/Hps.Exchange.PosGateway/PosGatewayService.asmx"
            );
        }
    }
}
