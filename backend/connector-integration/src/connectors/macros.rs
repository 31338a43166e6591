use std::marker::PhantomData;

use common_utils::{errors::CustomResult, ext_traits::BytesExt};
use domain_types::{errors, router_data_v2::RouterDataV2};
use error_stack::ResultExt;

use crate::types;

pub trait FlowTypes {
    type Flow;
    type FlowCommonData;
    type Request;
    type Response;
}

impl<F, FCD, Req, Resp> FlowTypes for RouterDataV2<F, FCD, Req, Resp> {
    type Flow = F;
    type FlowCommonData = FCD;
    type Request = Req;
    type Response = Resp;
}

impl<F, FCD, Req, Resp> FlowTypes for &RouterDataV2<F, FCD, Req, Resp> {
    type Flow = F;
    type FlowCommonData = FCD;
    type Request = Req;
    type Response = Resp;
}

/// Request bodies that are rendered as a complete XML document (declaration,
/// namespaces, SOAP envelope) instead of going through a serde content type.
pub trait GetXmlDocument {
    fn get_xml_document(&self) -> CustomResult<String, errors::ConnectorError>;
}

pub struct NoRequestBody;
pub struct NoRequestBodyTemplating;

impl<F, FCD, Req, Resp> TryFrom<RouterDataV2<F, FCD, Req, Resp>> for NoRequestBody {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(_value: RouterDataV2<F, FCD, Req, Resp>) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}

type RouterDataType<T> = RouterDataV2<
    <T as FlowTypes>::Flow,
    <T as FlowTypes>::FlowCommonData,
    <T as FlowTypes>::Request,
    <T as FlowTypes>::Response,
>;

type ResponseRouterDataType<T, R> = types::ResponseRouterData<
    R,
    RouterDataV2<
        <T as FlowTypes>::Flow,
        <T as FlowTypes>::FlowCommonData,
        <T as FlowTypes>::Request,
        <T as FlowTypes>::Response,
    >,
>;

pub trait BridgeRequestResponse: Send + Sync {
    type RequestBody;
    type ResponseBody;
    type ConnectorInputData: FlowTypes;
    fn request_body(
        &self,
        rd: Self::ConnectorInputData,
    ) -> CustomResult<Self::RequestBody, errors::ConnectorError>
    where
        Self::RequestBody:
            TryFrom<Self::ConnectorInputData, Error = error_stack::Report<errors::ConnectorError>>,
    {
        Self::RequestBody::try_from(rd)
    }

    fn response(
        &self,
        bytes: bytes::Bytes,
    ) -> CustomResult<Self::ResponseBody, errors::ConnectorError>
    where
        Self::ResponseBody: for<'a> serde::Deserialize<'a>,
    {
        if bytes.is_empty() {
            serde_json::from_str("{}")
                .change_context(errors::ConnectorError::ResponseDeserializationFailed)
        } else {
            bytes
                .parse_struct(std::any::type_name::<Self::ResponseBody>())
                .change_context(errors::ConnectorError::ResponseDeserializationFailed)
        }
    }

    fn router_data(
        &self,
        response: ResponseRouterDataType<Self::ConnectorInputData, Self::ResponseBody>,
    ) -> CustomResult<RouterDataType<Self::ConnectorInputData>, errors::ConnectorError>
    where
        RouterDataType<Self::ConnectorInputData>: TryFrom<
            ResponseRouterDataType<Self::ConnectorInputData, Self::ResponseBody>,
            Error = error_stack::Report<errors::ConnectorError>,
        >,
    {
        RouterDataType::<Self::ConnectorInputData>::try_from(response)
    }
}

#[derive(Clone)]
pub struct Bridge<Q, S>(pub PhantomData<(Q, S)>);

macro_rules! expand_fn_get_request_body {
    (
        $connector: ty,
        $curl_req: ty,
        RawXml,
        $curl_res: ty,
        $flow: ident,
        $resource_common_data: ty,
        $request: ty,
        $response: ty
    ) => {
        paste::paste! {
            fn get_request_body(
                &self,
                req: &macro_types::RouterDataV2<$flow, $resource_common_data, $request, $response>,
            ) -> macro_types::CustomResult<Option<macro_types::RequestContent>, macro_types::ConnectorError>
            {
                let bridge = self.[< $flow:snake >];
                let input_data = [<$connector RouterData>] {
                    connector: self.to_owned(),
                    router_data: req.clone(),
                };
                let request = bridge.request_body(input_data)?;
                let document = <$curl_req as GetXmlDocument>::get_xml_document(&request)?;
                Ok(Some(macro_types::RequestContent::RawBytes(document.into_bytes())))
            }
        }
    };
    (
        $connector: ty,
        $curl_req: ty,
        $content_type: ident,
        $curl_res: ty,
        $flow: ident,
        $resource_common_data: ty,
        $request: ty,
        $response: ty
    ) => {
        paste::paste! {
            fn get_request_body(
                &self,
                req: &macro_types::RouterDataV2<$flow, $resource_common_data, $request, $response>,
            ) -> macro_types::CustomResult<Option<macro_types::RequestContent>, macro_types::ConnectorError>
            {
                let bridge = self.[< $flow:snake >];
                let input_data = [< $connector RouterData >] {
                    connector: self.to_owned(),
                    router_data: req.clone(),
                };
                let request = bridge.request_body(input_data)?;
                Ok(Some(macro_types::RequestContent::$content_type(Box::new(request))))
            }
        }
    };
    ($connector: ty, $curl_res: ty, $flow: ident, $resource_common_data: ty, $request: ty, $response: ty) => {
        fn get_request_body(
            &self,
            _req: &macro_types::RouterDataV2<$flow, $resource_common_data, $request, $response>,
        ) -> macro_types::CustomResult<Option<macro_types::RequestContent>, macro_types::ConnectorError>
        {
            Ok(None)
        }
    };
}
pub(crate) use expand_fn_get_request_body;

macro_rules! expand_fn_handle_response {
    // Response body is rewritten by the connector (XML to JSON) before parsing
    ($connector: ty, $flow: ident, $resource_common_data: ty, $request: ty, $response: ty, true) => {
        fn handle_response_v2(
            &self,
            data: &macro_types::RouterDataV2<$flow, $resource_common_data, $request, $response>,
            event_builder: Option<&mut macro_types::ConnectorEvent>,
            res: macro_types::Response,
        ) -> macro_types::CustomResult<
            macro_types::RouterDataV2<$flow, $resource_common_data, $request, $response>,
            macro_types::ConnectorError,
        > {
            paste::paste! {let bridge = self.[< $flow:snake >];}

            let response_bytes = self
                .preprocess_response_bytes(res.response)
                .change_context(macro_types::ConnectorError::ResponseDeserializationFailed)?;

            let response_body = bridge.response(response_bytes)?;
            event_builder.map(|i| i.set_response_body(&response_body));
            let response_router_data = macro_types::ResponseRouterData {
                response: response_body,
                router_data: data.clone(),
                http_code: res.status_code,
            };
            let result = bridge.router_data(response_router_data)?;
            Ok(result)
        }
    };

    ($connector: ty, $flow: ident, $resource_common_data: ty, $request: ty, $response: ty, false) => {
        fn handle_response_v2(
            &self,
            data: &macro_types::RouterDataV2<$flow, $resource_common_data, $request, $response>,
            event_builder: Option<&mut macro_types::ConnectorEvent>,
            res: macro_types::Response,
        ) -> macro_types::CustomResult<
            macro_types::RouterDataV2<$flow, $resource_common_data, $request, $response>,
            macro_types::ConnectorError,
        > {
            paste::paste! {let bridge = self.[< $flow:snake >];}
            let response_body = bridge.response(res.response)?;
            event_builder.map(|i| i.set_response_body(&response_body));
            let response_router_data = macro_types::ResponseRouterData {
                response: response_body,
                router_data: data.clone(),
                http_code: res.status_code,
            };
            let result = bridge.router_data(response_router_data)?;
            Ok(result)
        }
    };
}
pub(crate) use expand_fn_handle_response;

macro_rules! expand_default_functions {
    (
        function: get_headers,
        flow_name:$flow: ident,
        resource_common_data:$resource_common_data: ty,
        flow_request:$request: ty,
        flow_response:$response: ty,
    ) => {
        fn get_headers(
            &self,
            req: &macro_types::RouterDataV2<$flow, $resource_common_data, $request, $response>,
        ) -> macro_types::CustomResult<
            Vec<(String, macro_types::Maskable<String>)>,
            macro_types::ConnectorError,
        > {
            self.build_headers(req)
        }
    };
    (
        function: get_content_type,
        flow_name:$flow: ident,
        resource_common_data:$resource_common_data: ty,
        flow_request:$request: ty,
        flow_response:$response: ty,
    ) => {
        fn get_content_type(&self) -> &'static str {
            self.common_get_content_type()
        }
    };
    (
        function: get_error_response_v2,
        flow_name:$flow: ident,
        resource_common_data:$resource_common_data: ty,
        flow_request:$request: ty,
        flow_response:$response: ty,
    ) => {
        fn get_error_response_v2(
            &self,
            res: macro_types::Response,
            event_builder: Option<&mut macro_types::ConnectorEvent>,
        ) -> macro_types::CustomResult<macro_types::ErrorResponse, macro_types::ConnectorError> {
            self.build_error_response(res, event_builder)
        }
    };
}
pub(crate) use expand_default_functions;

macro_rules! macro_connector_implementation {
    (
        connector_default_implementations: [$($function_name: ident), *],
        connector: $connector: ty,
        $(curl_request: $content_type:ident($curl_req: ty),)?
        curl_response:$curl_res: ty,
        flow_name:$flow: ident,
        resource_common_data:$resource_common_data: ty,
        flow_request:$request: ty,
        flow_response:$response: ty,
        http_method: $http_method_type:ident,
        preprocess_response: $preprocess_response: tt,
        other_functions: {
            $($function_def: tt)*
        }
    ) => {
        impl
            macro_types::ConnectorIntegrationV2<
                $flow,
                $resource_common_data,
                $request,
                $response,
            > for $connector
        {
            fn get_http_method(&self) -> common_utils::request::Method {
                common_utils::request::Method::$http_method_type
            }
            $($function_def)*
            $(
                macros::expand_default_functions!(
                    function: $function_name,
                    flow_name:$flow,
                    resource_common_data:$resource_common_data,
                    flow_request:$request,
                    flow_response:$response,
                );
            )*
            macros::expand_fn_get_request_body!(
                $connector,
                $($curl_req,)?
                $($content_type,)?
                $curl_res,
                $flow,
                $resource_common_data,
                $request,
                $response
            );
            macros::expand_fn_handle_response!(
                $connector,
                $flow,
                $resource_common_data,
                $request,
                $response,
                $preprocess_response
            );
        }
    };

    // Without preprocess_response the body is parsed as returned
    (
        connector_default_implementations: [$($function_name: ident), *],
        connector: $connector: ty,
        $(curl_request: $content_type:ident($curl_req: ty),)?
        curl_response:$curl_res: ty,
        flow_name:$flow: ident,
        resource_common_data:$resource_common_data: ty,
        flow_request:$request: ty,
        flow_response:$response: ty,
        http_method: $http_method_type:ident,
        other_functions: {
            $($function_def: tt)*
        }
    ) => {
        macros::macro_connector_implementation!(
            connector_default_implementations: [$($function_name), *],
            connector: $connector,
            $(curl_request: $content_type($curl_req),)?
            curl_response: $curl_res,
            flow_name: $flow,
            resource_common_data: $resource_common_data,
            flow_request: $request,
            flow_response: $response,
            http_method: $http_method_type,
            preprocess_response: false,
            other_functions: {
                $($function_def)*
            }
        );
    };
}
pub(crate) use macro_connector_implementation;

macro_rules! impl_templating {
    (
        connector: $connector: ident,
        curl_request: $curl_req: ident,
        curl_response: $curl_res: ident,
        router_data: $router_data: ty
    ) => {
        macros::create_template_types_for_request_and_response_types!($curl_req, $curl_res);
        paste::paste!{
            impl BridgeRequestResponse for Bridge<[<$curl_req Templating>], [<$curl_res Templating>]> {
                type RequestBody = $curl_req;
                type ResponseBody = $curl_res;
                type ConnectorInputData = [<$connector RouterData>]<$router_data>;
            }
        }
    };
    (
        connector: $connector: ident,
        curl_response: $curl_res: ident,
        router_data: $router_data: ty
    ) => {
        macros::create_template_types_for_request_and_response_types!($curl_res);
        paste::paste!{
            impl BridgeRequestResponse for Bridge<NoRequestBodyTemplating, [<$curl_res Templating>]> {
                type RequestBody = NoRequestBody;
                type ResponseBody = $curl_res;
                type ConnectorInputData = [<$connector RouterData>]<$router_data>;
            }
        }
    }
}
pub(crate) use impl_templating;

macro_rules! expand_connector_input_data {
    ($connector: ident) => {
        paste::paste! {
            pub struct [<$connector RouterData>]<RD: FlowTypes> {
                pub connector: $connector,
                pub router_data: RD,
            }
            impl<RD: FlowTypes> FlowTypes for [<$connector RouterData>]<RD> {
                type Flow = RD::Flow;
                type FlowCommonData = RD::FlowCommonData;
                type Request = RD::Request;
                type Response = RD::Response;
            }
        }
    };
}
pub(crate) use expand_connector_input_data;

macro_rules! create_template_types_for_request_and_response_types {
    ($($connector_type_name:ident),+) => {
        $(
            paste::paste!{pub struct [<$connector_type_name Templating>]; }
        )+
    };
}
pub(crate) use create_template_types_for_request_and_response_types;

macro_rules! optional_or_default {
    (
        $optional_item: ident |
        default: $default:ident
    ) => {
        $optional_item
    };
    (
        | default: $default:ident
    ) => {
        $default
    };
}
pub(crate) use optional_or_default;

macro_rules! create_all_prerequisites {
    (
        connector_name: $connector: ident,
        api: [
            $(
                (
                    flow: $flow_name: ident,
                    $(request_body: $flow_request: ident,)?
                    response_body: $flow_response: ident,
                    router_data: $router_data_type: ty
                )
            ),*
        ],
        amount_converters: [
            $($converter_name:ident : $amount_unit:ty),*
        ],
        member_functions: {
            $($function_def: tt)*
        }
    ) => {
        crate::connectors::macros::expand_imports!();
        macros::expand_connector_input_data!($connector);
        $(
            macros::impl_templating!(
                connector: $connector,
                $(curl_request: $flow_request,)?
                curl_response: $flow_response,
                router_data: $router_data_type
            );
        )*
        paste::paste! {
            #[derive(Clone)]
            pub struct $connector {
                $(
                    pub $converter_name: &'static (dyn common_utils::types::AmountConvertor<Output = $amount_unit> + Sync),
                )*
                $(
                    [<$flow_name:snake>]: &'static (dyn BridgeRequestResponse<
                        RequestBody = macros::optional_or_default!($($flow_request)? | default:NoRequestBody),
                        ResponseBody = $flow_response,
                        ConnectorInputData = [<$connector RouterData>]<$router_data_type>,
                    >),
                )*
            }
            impl $connector {
                pub const fn new() -> &'static Self {
                    &Self{
                        $(
                            $converter_name: &common_utils::types::[<$amount_unit ForConnector>],
                        )*
                        $(
                            [<$flow_name:snake>]: &Bridge::<
                                    macros::optional_or_default!($([<$flow_request Templating>])? | default:NoRequestBodyTemplating),
                                    [<$flow_response Templating>]
                                >(PhantomData),
                        )*
                    }
                }
                $($function_def)*
            }
        }
    };
}
pub(crate) use create_all_prerequisites;

macro_rules! expand_imports {
    () => {
        #[allow(unused_imports)]
        use crate::connectors::macros::{
            Bridge, BridgeRequestResponse, FlowTypes, GetXmlDocument, NoRequestBody,
            NoRequestBodyTemplating,
        };
        #[allow(unused_imports)]
        use error_stack::ResultExt as _;
        use std::marker::PhantomData;
        #[allow(unused_imports)]
        mod macro_types {
            pub(super) use crate::types::*;
            pub(super) use common_utils::{errors::CustomResult, request::RequestContent};
            pub(super) use domain_types::errors::ConnectorError;
            pub(super) use domain_types::router_data::ErrorResponse;
            pub(super) use domain_types::router_data_v2::RouterDataV2;
            pub(super) use domain_types::router_response_types::Response;
            pub(super) use hyperswitch_masking::Maskable;
            pub(super) use interfaces::connector_integration_v2::ConnectorIntegrationV2;
            pub(super) use interfaces::events::connector_api_logs::ConnectorEvent;
        }
    };
}
pub(crate) use expand_imports;
