#[cfg(test)]
mod tests {
    use common_enums::{AttemptStatus, CaptureMethod, RefundStatus, StandardErrorCode};
    use domain_types::{
        connector_types::{PaymentsResponseData, ResponseId},
        errors::ConnectorError,
        router_data::ConnectorAuthType,
    };
    use interfaces::{api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2};

    use crate::{connectors::Iveri, test_utils::*};

    const REQUEST_ID: &str = "{B90D7CDB-C8E8-4477-BDF2-695F28137874}";

    fn auth() -> ConnectorAuthType {
        body_key(
            "11111111-1111-1111-1111-111111111111",
            "{4B3A2F5E-7C2B-4E8C-9B0E-0E1D6C1A2B3C}",
        )
    }

    fn authorization() -> String {
        format!("{REQUEST_ID}|order_1001|537473")
    }

    /// SOAP envelope around an escaped V_XML transaction answer.
    fn execute_response(transaction: &str) -> String {
        let v_xml = format!(
            "<V_XML Version=\"2.0\" Direction=\"Response\">{transaction}</V_XML>"
        );
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
             <soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\"><soap:Body>\
             <ExecuteResponse xmlns=\"http://iveri.com/\"><ExecuteResult>{}</ExecuteResult></ExecuteResponse>\
             </soap:Body></soap:Envelope>",
            v_xml
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;")
                .replace('"', "&quot;")
        )
    }

    fn approved(command: &str) -> String {
        execute_response(&format!(
            "<Transaction ApplicationID=\"{{4B3A2F5E-7C2B-4E8C-9B0E-0E1D6C1A2B3C}}\" Command=\"{command}\" \
             Mode=\"Test\" RequestID=\"{REQUEST_ID}\">\
             <Result Status=\"0\" AppServer=\"105IVERIAPPPR01\" DBServer=\"105IVERIDBPR01\" Gateway=\"Nedbank\" AcquirerCode=\"00\"/>\
             <Amount>1000</Amount><AuthorisationCode>537473</AuthorisationCode><Currency>USD</Currency>\
             <MerchantReference>order_1001</MerchantReference>\
             <TransactionIndex>{{5CF0C08B-1E27-46A3-9D01-2B5A8D11A0C5}}</TransactionIndex>\
             </Transaction>"
        ))
    }

    fn declined() -> String {
        execute_response(&format!(
            "<Transaction Command=\"Debit\" Mode=\"Test\" RequestID=\"{REQUEST_ID}\">\
             <Result Status=\"-1\" Code=\"5\" Description=\"Denied\" AcquirerCode=\"05\" AcquirerDescription=\"Do not Honour\"/>\
             <MerchantReference>order_1001</MerchantReference>\
             </Transaction>"
        ))
    }

    mod authorize_tests {
        use super::*;

        #[test]
        fn debit_is_escaped_inside_execute_envelope() {
            let body = request_body(Iveri::new(), &authorize(auth(), None));

            assert!(body.contains("<Execute xmlns=\"http://iveri.com/\"><validateRequest>true</validateRequest>"));
            assert!(body.contains("<protocol>V_XML</protocol><protocolVersion>2.0</protocolVersion>"));
            assert!(body.contains(
                "<request>&lt;V_XML Version=&quot;2.0&quot; CertificateID=&quot;11111111-1111-1111-1111-111111111111&quot; Direction=&quot;Request&quot;&gt;"
            ));
            assert!(body.contains(
                "&lt;Transaction ApplicationID=&quot;{4B3A2F5E-7C2B-4E8C-9B0E-0E1D6C1A2B3C}&quot; Command=&quot;Debit&quot; Mode=&quot;Test&quot;&gt;"
            ));
            assert!(body.contains("&lt;Amount&gt;1000&lt;/Amount&gt;&lt;Currency&gt;USD&lt;/Currency&gt;"));
            assert!(body.contains("&lt;MerchantReference&gt;order_1001&lt;/MerchantReference&gt;"));
            assert!(body.contains(&format!("&lt;PAN&gt;{CARD_NUMBER}&lt;/PAN&gt;")));
            assert!(body.contains("&lt;ExpiryDate&gt;092030&lt;/ExpiryDate&gt;"));
            assert!(body.contains(&format!("&lt;CardSecurityCode&gt;{CVC}&lt;/CardSecurityCode&gt;")));
            assert!(body.contains("SecureChannel"));
            assert!(!body.contains("OriginalRequestID"));
            assert!(body.ends_with("</soap:Envelope>"));
        }

        #[test]
        fn manual_capture_is_authorisation() {
            let body = request_body(Iveri::new(), &authorize(auth(), Some(CaptureMethod::Manual)));
            assert!(body.contains("Command=&quot;Authorisation&quot;"));
        }

        #[test]
        fn stored_tokens_are_not_supported() {
            let router_data = router_data(
                payment_flow_data(),
                auth(),
                authorize_data(card_token("tok_1"), None),
            );
            let error = ConnectorIntegrationV2::get_request_body(Iveri::new(), &router_data)
                .unwrap_err();
            assert!(matches!(
                error.current_context(),
                ConnectorError::NotImplemented(_)
            ));
        }

        #[test]
        fn approved_debit_joins_request_reference_and_auth_code() {
            let result = handle_response(Iveri::new(), &authorize(auth(), None), 200, &approved("Debit"));

            assert_eq!(result.resource_common_data.status, AttemptStatus::Charged);
            match result.response {
                Ok(PaymentsResponseData::TransactionResponse {
                    resource_id,
                    connector_response_reference_id,
                    message,
                    ..
                }) => {
                    assert_eq!(resource_id, ResponseId::ConnectorTransactionId(authorization()));
                    assert_eq!(
                        connector_response_reference_id.as_deref(),
                        Some("{5CF0C08B-1E27-46A3-9D01-2B5A8D11A0C5}")
                    );
                    assert_eq!(message.as_deref(), Some("Succeeded"));
                }
                other => panic!("unexpected response {other:?}"),
            }
        }

        #[test]
        fn approved_authorisation_is_authorized() {
            let result = handle_response(
                Iveri::new(),
                &authorize(auth(), Some(CaptureMethod::Manual)),
                200,
                &approved("Authorisation"),
            );
            assert_eq!(result.resource_common_data.status, AttemptStatus::Authorized);
        }

        #[test]
        fn negative_status_is_a_decline() {
            let result = handle_response(Iveri::new(), &authorize(auth(), None), 200, &declined());

            assert_eq!(result.resource_common_data.status, AttemptStatus::Failure);
            let error = result.response.unwrap_err();
            assert_eq!(error.code, "5");
            assert_eq!(error.message, "Denied");
            assert_eq!(error.reason.as_deref(), Some("Do not Honour"));
            assert_eq!(error.standard_error_code, Some(StandardErrorCode::CardDeclined));
            assert_eq!(
                error.connector_transaction_id.as_deref(),
                Some(format!("{REQUEST_ID}|order_1001|").as_str())
            );
        }
    }

    mod error_result_tests {
        use super::*;

        #[test]
        fn bare_result_without_transaction_is_a_decline() {
            let response = execute_response(
                "<Result Status=\"-1\" Code=\"255\" Description=\"Credentials not valid\"/>",
            );
            let result = handle_response(Iveri::new(), &authorize(auth(), None), 200, &response);

            assert_eq!(result.resource_common_data.status, AttemptStatus::Failure);
            let error = result.response.unwrap_err();
            assert_eq!(error.code, "255");
            assert_eq!(error.message, "Credentials not valid");
            assert_eq!(
                error.standard_error_code,
                Some(StandardErrorCode::ProcessingError)
            );
        }

        #[test]
        fn bare_result_fails_refund() {
            let response = execute_response(
                "<Result Status=\"-1\" Code=\"255\" Description=\"Credentials not valid\"/>",
            );
            let router_data = refund(auth(), &authorization(), 500);
            let result = handle_response(Iveri::new(), &router_data, 200, &response);
            let error = result.response.unwrap_err();
            assert_eq!(error.code, "255");
        }
    }

    mod follow_up_tests {
        use super::*;

        #[test]
        fn capture_is_debit_against_original_request() {
            let router_data = capture(auth(), &authorization(), 750);
            let body = request_body(Iveri::new(), &router_data);
            assert!(body.contains("Command=&quot;Debit&quot;"));
            assert!(body.contains("&lt;Amount&gt;750&lt;/Amount&gt;"));
            assert!(body.contains(&format!(
                "&lt;OriginalRequestID&gt;{REQUEST_ID}&lt;/OriginalRequestID&gt;"
            )));
            assert!(body.contains("&lt;AuthorisationCode&gt;537473&lt;/AuthorisationCode&gt;"));
            assert!(!body.contains("PAN"));

            let result = handle_response(Iveri::new(), &router_data, 200, &approved("Debit"));
            assert_eq!(result.resource_common_data.status, AttemptStatus::Charged);
        }

        #[test]
        fn malformed_authorization_is_rejected() {
            let router_data = capture(auth(), "not-an-iveri-id", 750);
            let error =
                ConnectorIntegrationV2::get_request_body(Iveri::new(), &router_data).unwrap_err();
            assert!(matches!(
                error.current_context(),
                ConnectorError::InvalidDataFormat { .. }
            ));
        }

        #[test]
        fn void_sends_original_amount() {
            let router_data = void(auth(), &authorization());
            let body = request_body(Iveri::new(), &router_data);
            assert!(body.contains("Command=&quot;Void&quot;"));
            assert!(body.contains("&lt;Amount&gt;1000&lt;/Amount&gt;"));

            let result = handle_response(Iveri::new(), &router_data, 200, &approved("Void"));
            assert_eq!(result.resource_common_data.status, AttemptStatus::Voided);

            let result = handle_response(Iveri::new(), &router_data, 200, &declined());
            assert_eq!(result.resource_common_data.status, AttemptStatus::VoidFailed);
        }

        #[test]
        fn refund_is_credit() {
            let router_data = refund(auth(), &authorization(), 500);
            let body = request_body(Iveri::new(), &router_data);
            assert!(body.contains("Command=&quot;Credit&quot;"));
            assert!(body.contains("&lt;Amount&gt;500&lt;/Amount&gt;"));

            let result = handle_response(Iveri::new(), &router_data, 200, &approved("Credit"));
            let response = result.response.unwrap();
            assert_eq!(response.connector_refund_id, authorization());
            assert_eq!(response.refund_status, RefundStatus::Success);
        }

        #[test]
        fn refund_mode_follows_test_flag() {
            let mut router_data = refund(auth(), &authorization(), 500);
            router_data.resource_common_data.test_mode = None;
            let body = request_body(Iveri::new(), &router_data);
            assert!(body.contains("Mode=&quot;Test&quot;"));

            router_data.resource_common_data.test_mode = Some(false);
            let body = request_body(Iveri::new(), &router_data);
            assert!(body.contains("Mode=&quot;Live&quot;"));
        }
    }

    mod common_tests {
        use super::*;

        #[test]
        fn soap_fault_is_reported() {
            let fault = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
                <soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\"><soap:Body>\
                <soap:Fault><faultcode>soap:Server</faultcode>\
                <faultstring>Invalid CertificateID</faultstring></soap:Fault>\
                </soap:Body></soap:Envelope>";
            let error = Iveri::new()
                .build_error_response(http_response(500, fault), None)
                .unwrap();
            assert_eq!(error.code, "soap:Server");
            assert_eq!(error.message, "Invalid CertificateID");
        }

        #[test]
        fn scrubs_plain_and_escaped_card_data() {
            let escaped = "&lt;V_XML Version=&quot;2.0&quot; CertificateID=&quot;1111-2222&quot; Direction=&quot;Request&quot;&gt;\
                &lt;PAN&gt;4111111111111111&lt;/PAN&gt;&lt;ExpiryDate&gt;092030&lt;/ExpiryDate&gt;\
                &lt;CardSecurityCode&gt;123&lt;/CardSecurityCode&gt;";
            let scrubbed = Iveri::new().scrub(escaped);
            assert!(!scrubbed.contains("4111111111111111"));
            assert!(!scrubbed.contains("1111-2222"));
            assert!(scrubbed.contains("&lt;CardSecurityCode&gt;[FILTERED]&lt;/CardSecurityCode&gt;"));
            assert!(scrubbed.contains("&lt;ExpiryDate&gt;092030&lt;/ExpiryDate&gt;"));

            let plain = "<PAN>4111111111111111</PAN><CardSecurityCode>123</CardSecurityCode>";
            assert_eq!(
                Iveri::new().scrub(plain),
                "<PAN>[FILTERED]</PAN><CardSecurityCode>[FILTERED]</CardSecurityCode>"
            );
        }

        #[test]
        fn posts_execute_to_web_service() {
            let router_data = authorize(auth(), None);
            let url = ConnectorIntegrationV2::get_url(Iveri::new(), &router_data).unwrap();
            assert_eq!(url, "https://iveri.test/iVeriWebService/Service.asmx");

            let headers = ConnectorIntegrationV2::get_headers(Iveri::new(), &router_data).unwrap();
            assert!(headers
                .iter()
                .any(|(name, _)| name == "SOAPAction"));
        }
    }
}
