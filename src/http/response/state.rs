use crate::http::Error;

use serde::de::DeserializeOwned;
use std::marker::PhantomData;

pub struct Raw;

pub struct Json;

pub trait ResponseType {}

impl ResponseType for Raw {}
impl ResponseType for Json {}

pub enum Response<ResponseType, T> {
    Success(Inner<ResponseType, T>),
    Error(Error),
}

pub struct Inner<ResponseType, T> {
    marker: PhantomData<ResponseType>,
    pub payload: T,
    pub status: u16,
}

impl<S, T> Response<S, T>
where
    S: ResponseType,
{
    pub fn err(&self) -> Option<&Error> {
        match self {
            Response::Success(_) => None,
            Response::Error(inner) => Some(inner),
        }
    }

    pub fn collect(self) -> Result<T, Error> {
        match self {
            Response::Success(response) => Ok(response.payload),
            Response::Error(error) => Err(error),
        }
    }
}

pub trait AsyncFrom<T>: Sized {
    async fn async_from(value: T) -> Self;
}

async fn read_text(value: reqwest::Response) -> Result<(u16, String), Error> {
    let status = value.status().as_u16();

    let text = value
        .text()
        .await
        .map_err(|cause| Error::ReadResponseTextError { cause })?;

    if !(200..300).contains(&status) {
        return Err(Error::StatusError {
            status,
            message: text,
        });
    }

    Ok((status, text))
}

impl<T> AsyncFrom<reqwest::Response> for Response<Json, T>
where
    T: DeserializeOwned,
{
    async fn async_from(value: reqwest::Response) -> Self {
        let (status, text) = match read_text(value).await {
            Ok(read) => read,
            Err(err) => return Response::Error(err),
        };

        match serde_json::from_str::<T>(&text) {
            Ok(payload) => Response::Success(Inner {
                marker: PhantomData,
                status,
                payload,
            }),
            Err(cause) => Response::Error(Error::ParseResponseError { cause }),
        }
    }
}

impl AsyncFrom<reqwest::Response> for Response<Raw, String> {
    async fn async_from(value: reqwest::Response) -> Self {
        match read_text(value).await {
            Ok((status, payload)) => Response::Success(Inner {
                marker: PhantomData,
                status,
                payload,
            }),
            Err(err) => Response::Error(err),
        }
    }
}
